use std::path::Path;

use anyhow::{Context, Result};

use super::aggregate::GroupSummary;

/// Fixed download filename for the exported group summary.
pub const EXPORT_FILE_NAME: &str = "grouped_fuel_efficiency.csv";

/// UTF-8 byte-order mark, prepended so spreadsheet tools detect the encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Serialize a group summary as CSV bytes: UTF-8 BOM, header row with the
/// group and target column names, then one row per group in summary order.
/// `NaN` means (groups with no data) serialize as empty cells.
pub fn group_summary_csv(summary: &GroupSummary) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([&summary.group_column, &summary.target_column])
        .context("writing CSV header")?;

    for (key, mean) in &summary.rows {
        let mean_cell = if mean.is_nan() {
            String::new()
        } else {
            mean.to_string()
        };
        writer
            .write_record([key.to_string(), mean_cell])
            .context("writing CSV row")?;
    }

    let body = writer.into_inner().context("flushing CSV writer")?;
    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + body.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Write the exported summary to disk.
pub fn save_group_summary(path: &Path, summary: &GroupSummary) -> Result<()> {
    let bytes = group_summary_csv(summary)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn sample_summary() -> GroupSummary {
        GroupSummary {
            group_column: "Class".into(),
            target_column: "Fuel".into(),
            rows: vec![
                (CellValue::String("Sedan".into()), 3.0),
                (CellValue::String("SUV".into()), 6.0),
            ],
        }
    }

    #[test]
    fn export_starts_with_utf8_bom() {
        let bytes = group_summary_csv(&sample_summary()).unwrap();
        assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
    }

    #[test]
    fn round_trip_preserves_rows_and_column_order() {
        let summary = sample_summary();
        let bytes = group_summary_csv(&summary).unwrap();

        let mut reader = csv::Reader::from_reader(&bytes[3..]);
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(headers, vec!["Class", "Fuel"]);

        let rows: Vec<(String, f64)> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].to_string(), r[1].parse::<f64>().unwrap())
            })
            .collect();

        assert_eq!(rows.len(), summary.rows.len());
        for ((name, mean), (key, expected)) in rows.iter().zip(&summary.rows) {
            assert_eq!(name, &key.to_string());
            assert!((mean - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn nan_mean_exports_as_empty_cell() {
        let summary = GroupSummary {
            group_column: "Class".into(),
            target_column: "Fuel".into(),
            rows: vec![(CellValue::String("SUV".into()), f64::NAN)],
        };
        let bytes = group_summary_csv(&summary).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.lines().nth(1).unwrap().ends_with(','));
    }
}
