use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{CellValue, Record, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Conventional dataset location, relative to the working directory.
pub const DEFAULT_DATASET: &str = "co2.csv";

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with column names, one record per line
/// * `.json` – records-oriented array, `[{ "col": value, ... }, ...]`
///   (the default `df.to_json(orient='records')` shape)
///
/// A missing file is [`DataError::NotFound`], which the caller treats as
/// fatal: no partial dashboard is shown.  There is no caching layer; every
/// session re-reads from disk.
pub fn load_file(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(DataError::NotFound(path.to_path_buf()).into());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; cell types are inferred per
/// value (integer, then float, then text; empty cells are null).  No schema
/// is enforced beyond this inference — a later stage fails explicitly if an
/// expected column turns out to be absent or non-numeric.
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut record: Record = BTreeMap::new();
        for (col_idx, value) in row.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                bail!("CSV row {row_no}: more cells than header columns");
            };
            record.insert(col_name.clone(), guess_cell_type(value));
        }
        records.push(record);
    }

    Ok(Table::from_records(records, headers))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "Vehicle Class": "SUV", "Cylinders": 6, "Fuel Consumption Comb (L/100 km)": 10.2 },
///   ...
/// ]
/// ```
///
/// Column order follows first appearance across the records.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut record: Record = BTreeMap::new();
        for (key, val) in obj {
            if !column_names.iter().any(|c| c == key) {
                column_names.push(key.clone());
            }
            record.insert(key.clone(), json_to_cell(val)?);
        }
        records.push(record);
    }

    Ok(Table::from_records(records, column_names))
}

fn json_to_cell(val: &JsonValue) -> Result<CellValue> {
    Ok(match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Null => CellValue::Null,
        other => bail!("Unsupported cell value: {other}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnKind;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("fuelboard-{}-{name}", std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_file(Path::new("does-not-exist.csv")).unwrap_err();
        match err.downcast_ref::<DataError>() {
            Some(DataError::NotFound(p)) => {
                assert_eq!(p, Path::new("does-not-exist.csv"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn csv_types_are_inferred() {
        let path = write_temp(
            "infer.csv",
            "Vehicle Class,Engine Size(L),Cylinders,Fuel\nSUV,3.5,6,12.1\nSedan,2.0,4,\n",
        );
        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column_names,
            vec!["Vehicle Class", "Engine Size(L)", "Cylinders", "Fuel"]
        );
        assert_eq!(
            table.column_kind("Vehicle Class"),
            Some(ColumnKind::Categorical)
        );
        assert_eq!(table.column_kind("Engine Size(L)"), Some(ColumnKind::Numeric));
        assert_eq!(table.column_kind("Cylinders"), Some(ColumnKind::Numeric));
        // Empty cell becomes null, column stays numeric.
        assert_eq!(table.column_kind("Fuel"), Some(ColumnKind::Numeric));
        assert_eq!(table.records[1]["Fuel"], CellValue::Null);
        assert_eq!(table.records[0]["Cylinders"], CellValue::Integer(6));
        assert_eq!(table.records[0]["Engine Size(L)"], CellValue::Float(3.5));
    }

    #[test]
    fn json_records_load() {
        let path = write_temp(
            "records.json",
            r#"[{"Class":"SUV","Fuel":5.0},{"Class":"Sedan","Fuel":3.0}]"#,
        );
        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 2);
        assert_eq!(table.column_kind("Fuel"), Some(ColumnKind::Numeric));
        assert_eq!(
            table.records[1]["Class"],
            CellValue::String("Sedan".into())
        );
    }
}
