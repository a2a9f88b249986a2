use std::collections::BTreeSet;

use super::error::DataError;
use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Filter predicate: which values of one column are selected
// ---------------------------------------------------------------------------

/// Set of permitted values for one chosen column.  An empty set means
/// "no filter applied" (show everything) — never an empty result.
pub type FilterSelection = BTreeSet<CellValue>;

/// Restrict `table` to the records whose value of `col` is a member of
/// `allowed`, preserving original record order.
///
/// The empty selection is the "no filter" sentinel and returns the table
/// unchanged.  Records missing the column count as null; they survive only
/// if `Null` itself is selected.
pub fn filter_by_values(
    table: &Table,
    col: &str,
    allowed: &FilterSelection,
) -> Result<Table, DataError> {
    if !table.has_column(col) {
        return Err(DataError::ColumnNotFound(col.to_string()));
    }
    if allowed.is_empty() {
        return Ok(table.clone());
    }

    let kept = table
        .records
        .iter()
        .filter(|rec| allowed.contains(rec.get(col).unwrap_or(&CellValue::Null)))
        .cloned()
        .collect();

    Ok(table.with_records(kept))
}

/// Distinct values of one column, for building the selection checkboxes.
pub fn selectable_values(table: &Table, col: &str) -> Vec<CellValue> {
    table
        .unique_values
        .get(col)
        .map(|vals| vals.iter().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn sample_table() -> Table {
        let records = vec![
            record(&[
                ("Class", CellValue::String("SUV".into())),
                ("Fuel", CellValue::Float(5.0)),
            ]),
            record(&[
                ("Class", CellValue::String("SUV".into())),
                ("Fuel", CellValue::Float(7.0)),
            ]),
            record(&[
                ("Class", CellValue::String("Sedan".into())),
                ("Fuel", CellValue::Float(3.0)),
            ]),
        ];
        Table::from_records(records, vec!["Class".into(), "Fuel".into()])
    }

    #[test]
    fn empty_selection_is_identity() {
        let table = sample_table();
        let out = filter_by_values(&table, "Class", &FilterSelection::new()).unwrap();
        assert_eq!(out.len(), table.len());
        assert_eq!(out.records, table.records);
    }

    #[test]
    fn membership_and_order_are_preserved() {
        let table = sample_table();
        let allowed: FilterSelection = [CellValue::String("SUV".into())].into_iter().collect();
        let out = filter_by_values(&table, "Class", &allowed).unwrap();

        assert_eq!(out.len(), 2);
        for rec in &out.records {
            assert!(allowed.contains(&rec["Class"]));
        }
        // Original order: 5.0 then 7.0.
        assert_eq!(out.records[0]["Fuel"], CellValue::Float(5.0));
        assert_eq!(out.records[1]["Fuel"], CellValue::Float(7.0));
    }

    #[test]
    fn single_value_scenario() {
        let table = sample_table();
        let allowed: FilterSelection = [CellValue::String("Sedan".into())].into_iter().collect();
        let out = filter_by_values(&table, "Class", &allowed).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.records[0]["Fuel"], CellValue::Float(3.0));
    }

    #[test]
    fn no_matches_yields_empty_table_not_error() {
        let table = sample_table();
        let allowed: FilterSelection = [CellValue::String("Truck".into())].into_iter().collect();
        let out = filter_by_values(&table, "Class", &allowed).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn unknown_column_is_rejected() {
        let table = sample_table();
        let err = filter_by_values(&table, "Colour", &FilterSelection::new()).unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(_)));
    }
}
