use std::collections::BTreeMap;

use super::error::DataError;
use super::model::{CellValue, ColumnKind, Table};

// ---------------------------------------------------------------------------
// GroupSummary – one mean per distinct group key
// ---------------------------------------------------------------------------

/// Derived table: one row per distinct value of the grouping column, holding
/// the mean of the target column over the matching records.  Recomputed in
/// full on every parameter change; never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub group_column: String,
    pub target_column: String,
    /// (group key, mean) pairs, sorted ascending by mean.  A `NaN` mean
    /// marks a group with no present values ("no data", not zero).
    pub rows: Vec<(CellValue, f64)>,
}

impl GroupSummary {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Partition `table` by the value of `group_col` and compute the arithmetic
/// mean of `target_col` per partition.
///
/// Nulls in the target are ignored: mean = sum of present values / count of
/// present values.  A partition with zero present values yields `NaN`.
/// Output rows are sorted ascending by mean so downstream charts read as a
/// low-to-high ranking; `NaN` rows sort last.
pub fn group_mean(
    table: &Table,
    group_col: &str,
    target_col: &str,
) -> Result<GroupSummary, DataError> {
    if !table.has_column(group_col) {
        return Err(DataError::ColumnNotFound(group_col.to_string()));
    }
    match table.column_kind(target_col) {
        None => return Err(DataError::ColumnNotFound(target_col.to_string())),
        Some(ColumnKind::Categorical) => {
            return Err(DataError::TypeMismatch(target_col.to_string()));
        }
        Some(ColumnKind::Numeric) => {}
    }

    // key → (sum, count of present target values)
    let mut partitions: BTreeMap<CellValue, (f64, usize)> = BTreeMap::new();

    for rec in &table.records {
        let key = rec.get(group_col).cloned().unwrap_or(CellValue::Null);
        let entry = partitions.entry(key).or_insert((0.0, 0));
        if let Some(v) = rec.get(target_col).and_then(CellValue::as_f64) {
            entry.0 += v;
            entry.1 += 1;
        }
    }

    let mut rows: Vec<(CellValue, f64)> = partitions
        .into_iter()
        .map(|(key, (sum, count))| {
            let mean = if count == 0 { f64::NAN } else { sum / count as f64 };
            (key, mean)
        })
        .collect();

    rows.sort_by(|a, b| a.1.total_cmp(&b.1));

    Ok(GroupSummary {
        group_column: group_col.to_string(),
        target_column: target_col.to_string(),
        rows,
    })
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
    fn means_are_sorted_ascending() {
        let summary = group_mean(&sample_table(), "Class", "Fuel").unwrap();
        assert_eq!(
            summary.rows,
            vec![
                (CellValue::String("Sedan".into()), 3.0),
                (CellValue::String("SUV".into()), 6.0),
            ]
        );
    }

    #[test]
    fn group_keys_match_distinct_input_values() {
        let table = sample_table();
        let summary = group_mean(&table, "Class", "Fuel").unwrap();
        let keys: std::collections::BTreeSet<_> =
            summary.rows.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, table.unique_values["Class"]);
    }

    #[test]
    fn nulls_are_ignored_in_the_mean() {
        let records = vec![
            record(&[
                ("Class", CellValue::String("SUV".into())),
                ("Fuel", CellValue::Float(4.0)),
            ]),
            record(&[
                ("Class", CellValue::String("SUV".into())),
                ("Fuel", CellValue::Null),
            ]),
        ];
        let table = Table::from_records(records, vec!["Class".into(), "Fuel".into()]);
        let summary = group_mean(&table, "Class", "Fuel").unwrap();
        assert_eq!(summary.rows, vec![(CellValue::String("SUV".into()), 4.0)]);
    }

    #[test]
    fn all_null_group_is_nan_and_sorts_last() {
        let records = vec![
            record(&[
                ("Class", CellValue::String("SUV".into())),
                ("Fuel", CellValue::Null),
            ]),
            record(&[
                ("Class", CellValue::String("Sedan".into())),
                ("Fuel", CellValue::Float(3.0)),
            ]),
        ];
        let table = Table::from_records(records, vec!["Class".into(), "Fuel".into()]);
        let summary = group_mean(&table, "Class", "Fuel").unwrap();
        assert_eq!(summary.rows[0], (CellValue::String("Sedan".into()), 3.0));
        assert_eq!(summary.rows[1].0, CellValue::String("SUV".into()));
        assert!(summary.rows[1].1.is_nan());
    }

    #[test]
    fn numeric_group_column_is_allowed() {
        let records = vec![
            record(&[
                ("Cylinders", CellValue::Integer(4)),
                ("Fuel", CellValue::Float(6.0)),
            ]),
            record(&[
                ("Cylinders", CellValue::Integer(8)),
                ("Fuel", CellValue::Float(12.0)),
            ]),
        ];
        let table = Table::from_records(records, vec!["Cylinders".into(), "Fuel".into()]);
        let summary = group_mean(&table, "Cylinders", "Fuel").unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.rows[0].0, CellValue::Integer(4));
    }

    #[test]
    fn missing_columns_and_bad_target_are_rejected() {
        let table = sample_table();
        assert!(matches!(
            group_mean(&table, "Colour", "Fuel"),
            Err(DataError::ColumnNotFound(_))
        ));
        assert!(matches!(
            group_mean(&table, "Class", "Torque"),
            Err(DataError::ColumnNotFound(_))
        ));
        assert!(matches!(
            group_mean(&table, "Fuel", "Class"),
            Err(DataError::TypeMismatch(_))
        ));
    }
}
