use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common CSV dtypes.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                String(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnKind – Numeric vs Categorical classification
// ---------------------------------------------------------------------------

/// Semantic kind of a column, inferred once at load time and held fixed for
/// the session.  Drives which columns are offered as grouping keys
/// (categorical) versus aggregation targets (numeric).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// Dynamic columns: column_name → value.
pub type Record = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.  Loaded once,
/// never mutated; every derived view (group summary, filtered subset) is
/// recomputed from it in full.
#[derive(Debug, Clone)]
pub struct Table {
    /// All records (rows), in source order.
    pub records: Vec<Record>,
    /// Column names in source header order.
    pub column_names: Vec<String>,
    /// Numeric / Categorical classification per column.
    pub kinds: BTreeMap<String, ColumnKind>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl Table {
    /// Build a table from parsed records, classifying each column.
    ///
    /// A column is `Numeric` when every non-null observed value is an
    /// integer or float; any text value makes it `Categorical`.  Columns
    /// with no non-null values default to `Categorical`.
    pub fn from_records(records: Vec<Record>, column_names: Vec<String>) -> Self {
        let mut kinds: BTreeMap<String, ColumnKind> = BTreeMap::new();
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();

        for col in &column_names {
            let mut numeric = false;
            let mut categorical = false;
            let uniques = unique_values.entry(col.clone()).or_default();

            for rec in &records {
                let val = rec.get(col).unwrap_or(&CellValue::Null);
                uniques.insert(val.clone());
                match val {
                    CellValue::Integer(_) | CellValue::Float(_) => numeric = true,
                    CellValue::String(_) => categorical = true,
                    CellValue::Null => {}
                }
            }

            let kind = if numeric && !categorical {
                ColumnKind::Numeric
            } else {
                ColumnKind::Categorical
            };
            kinds.insert(col.clone(), kind);
        }

        Table {
            records,
            column_names,
            kinds,
            unique_values,
        }
    }

    /// Derive a table holding a subset of this table's records, keeping the
    /// column order and load-time classification.  Unique value sets are
    /// recomputed from the subset.
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();
        for col in &self.column_names {
            let uniques = unique_values.entry(col.clone()).or_default();
            for rec in &records {
                uniques.insert(rec.get(col).cloned().unwrap_or(CellValue::Null));
            }
        }
        Table {
            records,
            column_names: self.column_names.clone(),
            kinds: self.kinds.clone(),
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.kinds.get(name).copied()
    }

    /// Column names classified as numeric, in header order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.column_names
            .iter()
            .filter(|c| self.kinds.get(*c) == Some(&ColumnKind::Numeric))
            .cloned()
            .collect()
    }

    /// Column names classified as categorical, in header order.
    pub fn categorical_columns(&self) -> Vec<String> {
        self.column_names
            .iter()
            .filter(|c| self.kinds.get(*c) == Some(&ColumnKind::Categorical))
            .cloned()
            .collect()
    }

    /// Iterate the values of one column in record order.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.records
            .iter()
            .map(move |rec| rec.get(name).unwrap_or(&CellValue::Null))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(pairs: &[(&str, CellValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn column_classification() {
        let records = vec![
            record(&[
                ("Class", CellValue::String("SUV".into())),
                ("Fuel", CellValue::Float(5.0)),
                ("Cylinders", CellValue::Integer(4)),
            ]),
            record(&[
                ("Class", CellValue::String("Sedan".into())),
                ("Fuel", CellValue::Null),
                ("Cylinders", CellValue::Integer(6)),
            ]),
        ];
        let table = Table::from_records(
            records,
            vec!["Class".into(), "Fuel".into(), "Cylinders".into()],
        );

        assert_eq!(table.column_kind("Class"), Some(ColumnKind::Categorical));
        assert_eq!(table.column_kind("Fuel"), Some(ColumnKind::Numeric));
        assert_eq!(table.column_kind("Cylinders"), Some(ColumnKind::Numeric));
        assert_eq!(table.numeric_columns(), vec!["Fuel", "Cylinders"]);
        assert_eq!(table.categorical_columns(), vec!["Class"]);
    }

    #[test]
    fn mixed_column_is_categorical() {
        let records = vec![
            record(&[("v", CellValue::Integer(1))]),
            record(&[("v", CellValue::String("two".into()))]),
        ];
        let table = Table::from_records(records, vec!["v".into()]);
        assert_eq!(table.column_kind("v"), Some(ColumnKind::Categorical));
    }

    #[test]
    fn unique_values_are_sorted_and_deduplicated() {
        let records = vec![
            record(&[("Class", CellValue::String("SUV".into()))]),
            record(&[("Class", CellValue::String("Sedan".into()))]),
            record(&[("Class", CellValue::String("SUV".into()))]),
        ];
        let table = Table::from_records(records, vec!["Class".into()]);
        let uniques: Vec<String> = table.unique_values["Class"]
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(uniques, vec!["SUV", "Sedan"]);
    }

    #[test]
    fn subset_inherits_classification() {
        let records = vec![
            record(&[("n", CellValue::Integer(1))]),
            record(&[("n", CellValue::Integer(2))]),
        ];
        let table = Table::from_records(records, vec!["n".into()]);
        let subset = table.with_records(Vec::new());
        assert!(subset.is_empty());
        assert_eq!(subset.column_kind("n"), Some(ColumnKind::Numeric));
        assert_eq!(subset.column_names, table.column_names);
    }
}
