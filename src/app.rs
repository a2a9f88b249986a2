use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader::{self, DEFAULT_DATASET};
use crate::state::AppState;
use crate::ui::{heatmap, panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FuelBoardApp {
    pub state: AppState,
}

impl FuelBoardApp {
    /// Create the app, auto-loading the conventional `co2.csv` from the
    /// working directory.  A missing file is fatal: the session renders only
    /// the error screen.
    pub fn new() -> Self {
        let mut state = AppState::default();
        let path = Path::new(DEFAULT_DATASET);
        match loader::load_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} records with columns {:?}",
                    table.len(),
                    table.column_names
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load {DEFAULT_DATASET}: {e:#}");
                state.fatal_error = Some(format!(
                    "{e:#}\n\nPlace {DEFAULT_DATASET} in the working directory and restart."
                ));
            }
        }
        Self { state }
    }
}

impl Default for FuelBoardApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for FuelBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Fatal load failure: nothing renders past the error message.
        if let Some(msg) = self.state.fatal_error.clone() {
            egui::CentralPanel::default().show(ctx, |ui: &mut Ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading(RichText::new(msg).color(Color32::RED));
                });
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui: &mut Ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: analysis controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui: &mut Ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart, heatmap, tables ----
        egui::CentralPanel::default().show(ctx, |ui: &mut Ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    if let (Some(group), Some(target)) =
                        (&self.state.group_column, &self.state.target_column)
                    {
                        ui.heading(format!("{target} by {group}"));
                    }
                    plot::group_chart(ui, &self.state);
                    ui.separator();

                    egui::CollapsingHeader::new("Correlation heatmap")
                        .default_open(true)
                        .show(ui, |ui: &mut Ui| {
                            heatmap::correlation_heatmap(ui, &self.state);
                        });

                    egui::CollapsingHeader::new("Group summary")
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            tables::summary_table(ui, &self.state);
                        });

                    egui::CollapsingHeader::new("Data preview")
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            tables::data_preview(ui, &self.state);
                        });

                    egui::CollapsingHeader::new("Summary statistics")
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            tables::describe_table(ui, &self.state);
                        });
                });
        });
    }
}
