use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::CellValue;
use crate::state::AppState;

/// Rows shown in the data preview, mirroring a `df.head()`-style view.
const PREVIEW_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// Data preview – first rows of the filtered table
// ---------------------------------------------------------------------------

pub fn data_preview(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.filtered else {
        ui.label("No dataset loaded.");
        return;
    };
    if table.is_empty() {
        ui.label("No rows match the current filter.");
        return;
    }

    let columns = table.column_names.clone();
    let n_rows = table.len().min(PREVIEW_ROWS);

    ui.push_id("data_preview", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), columns.len())
            .header(18.0, |mut header| {
                for col in &columns {
                    header.col(|ui| {
                        ui.strong(col);
                    });
                }
            })
            .body(|body| {
                body.rows(16.0, n_rows, |mut row| {
                    let rec = &table.records[row.index()];
                    for col in &columns {
                        row.col(|ui| {
                            let val = rec.get(col).unwrap_or(&CellValue::Null);
                            ui.label(format_cell(val));
                        });
                    }
                });
            });
    });

    if table.len() > PREVIEW_ROWS {
        ui.small(format!("… {} more rows", table.len() - PREVIEW_ROWS));
    }
}

// ---------------------------------------------------------------------------
// Describe – summary statistics of the numeric columns
// ---------------------------------------------------------------------------

pub fn describe_table(ui: &mut Ui, state: &AppState) {
    if state.stats.is_empty() {
        ui.label("No numeric columns.");
        return;
    }

    let headers = ["Column", "Count", "Mean", "Std", "Min", "Max"];

    ui.push_id("describe", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), headers.len())
            .header(18.0, |mut header| {
                for h in headers {
                    header.col(|ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|body| {
                body.rows(16.0, state.stats.len(), |mut row| {
                    let s = &state.stats[row.index()];
                    row.col(|ui| {
                        ui.label(&s.column);
                    });
                    row.col(|ui| {
                        ui.label(s.count.to_string());
                    });
                    for v in [s.mean, s.std, s.min, s.max] {
                        row.col(|ui| {
                            ui.label(format_float(v));
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Group summary – one mean per group, ascending
// ---------------------------------------------------------------------------

pub fn summary_table(ui: &mut Ui, state: &AppState) {
    let Some(summary) = &state.summary else {
        ui.label("No group summary available.");
        return;
    };

    ui.push_id("group_summary", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), 2)
            .header(18.0, |mut header| {
                header.col(|ui| {
                    ui.strong(&summary.group_column);
                });
                header.col(|ui| {
                    ui.strong(&summary.target_column);
                });
            })
            .body(|body| {
                body.rows(16.0, summary.rows.len(), |mut row| {
                    let (key, mean) = &summary.rows[row.index()];
                    row.col(|ui| {
                        ui.label(key.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format_float(*mean));
                    });
                });
            });
    });
}

fn format_cell(val: &CellValue) -> String {
    match val {
        CellValue::Float(v) => format_float(*v),
        other => other.to_string(),
    }
}

fn format_float(v: f64) -> String {
    if v.is_nan() {
        "–".to_string()
    } else {
        format!("{v:.2}")
    }
}
