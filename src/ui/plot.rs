use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::model::CellValue;
use crate::data::stats::quartiles;
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Grouped-analysis chart (central panel)
// ---------------------------------------------------------------------------

/// Render the grouped fuel-consumption chart for the current parameters.
pub fn group_chart(ui: &mut Ui, state: &AppState) {
    let (Some(table), Some(filtered), Some(summary)) =
        (&state.table, &state.filtered, &state.summary)
    else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No grouped view available");
        });
        return;
    };

    if summary.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No rows match the current filter.");
        });
        return;
    }

    let colors = table
        .unique_values
        .get(&summary.group_column)
        .map(|vals| ColorMap::new(&summary.group_column, vals));

    // Group keys in summary order (ascending by mean) → x positions 0..n.
    let labels: Vec<String> = summary.rows.iter().map(|(k, _)| k.to_string()).collect();

    let plot = Plot::new("group_chart")
        .legend(Legend::default())
        .x_axis_label(summary.group_column.clone())
        .y_axis_label(summary.target_column.clone())
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .height(340.0);

    match state.chart {
        ChartKind::Bar => {
            let bars: Vec<Bar> = summary
                .rows
                .iter()
                .enumerate()
                .filter(|(_, (_, mean))| !mean.is_nan())
                .map(|(i, (key, mean))| {
                    let mut bar = Bar::new(i as f64, *mean).width(0.7).name(key.to_string());
                    if let Some(cm) = &colors {
                        bar = bar.fill(cm.color_for(key));
                    }
                    bar
                })
                .collect();

            plot.show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(&summary.target_column));
            });
        }
        ChartKind::Box => {
            let values = values_by_group(state, filtered);
            let boxes: Vec<BoxElem> = summary
                .rows
                .iter()
                .enumerate()
                .filter_map(|(i, (key, _))| {
                    let vals = values.get(key)?;
                    let q = quartiles(vals)?;
                    let mut elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(q.min, q.q1, q.median, q.q3, q.max),
                    )
                    .name(key.to_string());
                    if let Some(cm) = &colors {
                        elem = elem.fill(cm.color_for(key).gamma_multiply(0.6));
                    }
                    Some(elem)
                })
                .collect();

            plot.show(ui, |plot_ui| {
                plot_ui.box_plot(BoxPlot::new(boxes).name(&summary.target_column));
            });
        }
        ChartKind::Scatter => {
            let values = values_by_group(state, filtered);
            plot.show(ui, |plot_ui| {
                for (i, (key, _)) in summary.rows.iter().enumerate() {
                    let Some(vals) = values.get(key) else {
                        continue;
                    };
                    let points: PlotPoints =
                        vals.iter().map(|&y| [i as f64, y]).collect();
                    let mut scatter = Points::new(points).radius(2.5).name(key.to_string());
                    if let Some(cm) = &colors {
                        scatter = scatter.color(cm.color_for(key));
                    }
                    plot_ui.points(scatter);
                }
            });
        }
    }
}

/// Present target values of the filtered table, bucketed by group key.
fn values_by_group(state: &AppState, filtered: &crate::data::model::Table) -> BTreeMap<CellValue, Vec<f64>> {
    let mut buckets: BTreeMap<CellValue, Vec<f64>> = BTreeMap::new();
    let (Some(group), Some(target)) = (&state.group_column, &state.target_column) else {
        return buckets;
    };
    for rec in &filtered.records {
        let key = rec.get(group.as_str()).cloned().unwrap_or(CellValue::Null);
        if let Some(v) = rec.get(target.as_str()).and_then(CellValue::as_f64) {
            buckets.entry(key).or_default().push(v);
        }
    }
    buckets
}
