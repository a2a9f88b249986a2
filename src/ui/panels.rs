use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::{EXPORT_FILE_NAME, save_group_summary};
use crate::data::filter::selectable_values;
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Left side panel – analysis controls and value filter
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analysis");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the widgets.
    let group_choices = state.group_choices();
    let numeric_cols = table.numeric_columns();
    let categorical_cols = table.categorical_columns();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Grouping column ----
            ui.strong("Group by");
            let current_group = state.group_column.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("group_by")
                .selected_text(&current_group)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &group_choices {
                        if ui.selectable_label(current_group == *col, col).clicked() {
                            state.set_group_column(col.clone());
                        }
                    }
                });
            ui.add_space(4.0);

            // ---- Aggregation target ----
            ui.strong("Target");
            let current_target = state.target_column.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("target")
                .selected_text(&current_target)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &numeric_cols {
                        if ui.selectable_label(current_target == *col, col).clicked() {
                            state.set_target_column(col.clone());
                        }
                    }
                });
            ui.add_space(4.0);

            // ---- Chart style ----
            ui.strong("Chart");
            ui.horizontal(|ui: &mut Ui| {
                for kind in ChartKind::ALL {
                    if ui
                        .selectable_label(state.chart == kind, kind.label())
                        .clicked()
                    {
                        state.chart = kind;
                    }
                }
            });
            ui.separator();

            // ---- Value filter ----
            ui.heading("Filter");
            ui.strong("Column");
            let current_filter = state.filter_column.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("filter_column")
                .selected_text(&current_filter)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &categorical_cols {
                        if ui.selectable_label(current_filter == *col, col).clicked() {
                            state.set_filter_column(col.clone());
                        }
                    }
                });

            let Some(filter_col) = state.filter_column.clone() else {
                return;
            };
            let Some(table) = &state.table else {
                return;
            };
            let values = selectable_values(table, &filter_col);

            let n_selected = state.filter_values.len();
            let header = if n_selected == 0 {
                format!("{} values (no filter)", values.len())
            } else {
                format!("{n_selected}/{} selected", values.len())
            };
            ui.label(header);

            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            for val in &values {
                let mut checked = state.filter_values.contains(val);
                if ui.checkbox(&mut checked, val.to_string()).changed() {
                    state.toggle_filter_value(val);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.summary.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export group summary…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(filtered)) = (&state.table, &state.filtered) {
            ui.label(format!(
                "{} records loaded, {} visible",
                table.len(),
                filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open vehicle dataset")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} records with columns {:?}",
                    table.len(),
                    table.column_names
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(summary) = state.summary.clone() else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export group summary")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match save_group_summary(&path, &summary) {
            Ok(()) => {
                log::info!("Exported group summary to {}", path.display());
                state.status_message = Some(format!("Exported {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
