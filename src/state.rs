use crate::data::aggregate::{GroupSummary, group_mean};
use crate::data::filter::{FilterSelection, filter_by_values};
use crate::data::model::{CellValue, ColumnKind, Table};
use crate::data::stats::{ColumnStats, CorrelationMatrix, correlation_matrix, describe};

// ---------------------------------------------------------------------------
// Analysis parameters
// ---------------------------------------------------------------------------

/// Chart style for the grouped-analysis view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Box,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Box, ChartKind::Scatter];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar chart",
            ChartKind::Box => "Box plot",
            ChartKind::Scatter => "Scatter",
        }
    }
}

/// Columns offered as grouping keys, in menu order.  Intersected with the
/// columns actually present in the loaded table.
pub const GROUP_COLUMNS: [&str; 4] =
    ["Vehicle Class", "Engine Size(L)", "Cylinders", "Fuel Type"];

/// Default aggregation target when present in the dataset.
pub const DEFAULT_TARGET: &str = "Fuel Consumption Comb (L/100 km)";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
///
/// The loaded [`Table`] is the single source of truth; `filtered`, `summary`,
/// `stats` and `correlation` are derived views recomputed in full by
/// [`AppState::refresh`] after every parameter change.
pub struct AppState {
    /// Loaded dataset (None until a file loads).
    pub table: Option<Table>,

    /// Chosen grouping column.
    pub group_column: Option<String>,

    /// Chosen aggregation target (numeric column).
    pub target_column: Option<String>,

    /// Active chart style.
    pub chart: ChartKind,

    /// Column the value filter applies to.
    pub filter_column: Option<String>,

    /// Selected values for `filter_column`; empty = no filter.
    pub filter_values: FilterSelection,

    /// Table restricted by the current filter (cached derived view).
    pub filtered: Option<Table>,

    /// Per-group means over the filtered table (cached derived view).
    pub summary: Option<GroupSummary>,

    /// Descriptive statistics of the numeric columns.
    pub stats: Vec<ColumnStats>,

    /// Pearson correlation over the numeric columns.
    pub correlation: Option<CorrelationMatrix>,

    /// Non-fatal status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// Fatal load failure: when set, only the error screen renders.
    pub fatal_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            group_column: None,
            target_column: None,
            chart: ChartKind::Bar,
            filter_column: None,
            filter_values: FilterSelection::new(),
            filtered: None,
            summary: None,
            stats: Vec::new(),
            correlation: None,
            status_message: None,
            fatal_error: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table, pick default parameters, and build the
    /// derived views.
    pub fn set_table(&mut self, table: Table) {
        self.group_column = GROUP_COLUMNS
            .iter()
            .copied()
            .find(|c| table.has_column(c))
            .map(str::to_string)
            .or_else(|| table.categorical_columns().first().cloned());

        self.target_column = if table.column_kind(DEFAULT_TARGET) == Some(ColumnKind::Numeric) {
            Some(DEFAULT_TARGET.to_string())
        } else {
            table.numeric_columns().first().cloned()
        };

        self.filter_column = table.categorical_columns().first().cloned();
        self.filter_values = FilterSelection::new();

        self.table = Some(table);
        self.fatal_error = None;
        self.status_message = None;
        self.refresh();
    }

    /// Grouping columns available for the loaded table, in menu order.
    pub fn group_choices(&self) -> Vec<String> {
        let Some(table) = &self.table else {
            return Vec::new();
        };
        GROUP_COLUMNS
            .iter()
            .copied()
            .filter(|c| table.has_column(c))
            .map(str::to_string)
            .collect()
    }

    /// Recompute every derived view from the immutable table.
    pub fn refresh(&mut self) {
        self.filtered = None;
        self.summary = None;
        self.stats = Vec::new();
        self.correlation = None;

        let Some(table) = &self.table else {
            return;
        };

        self.stats = describe(table);
        match correlation_matrix(table, &table.numeric_columns()) {
            Ok(m) => self.correlation = Some(m),
            Err(e) => {
                log::warn!("correlation failed: {e}");
                self.status_message = Some(e.to_string());
            }
        }

        let filtered = match &self.filter_column {
            Some(col) => match filter_by_values(table, col, &self.filter_values) {
                Ok(t) => t,
                Err(e) => {
                    log::warn!("filter failed: {e}");
                    self.status_message = Some(e.to_string());
                    table.clone()
                }
            },
            None => table.clone(),
        };

        if let (Some(group), Some(target)) = (&self.group_column, &self.target_column) {
            match group_mean(&filtered, group, target) {
                Ok(summary) => self.summary = Some(summary),
                Err(e) => {
                    log::warn!("group mean failed: {e}");
                    self.status_message = Some(e.to_string());
                }
            }
        }

        self.filtered = Some(filtered);
    }

    pub fn set_group_column(&mut self, col: String) {
        self.group_column = Some(col);
        self.refresh();
    }

    pub fn set_target_column(&mut self, col: String) {
        self.target_column = Some(col);
        self.refresh();
    }

    /// Switch the filter column; the selection resets to empty ("no filter").
    pub fn set_filter_column(&mut self, col: String) {
        self.filter_column = Some(col);
        self.filter_values = FilterSelection::new();
        self.refresh();
    }

    /// Toggle a single value in the current filter selection.
    pub fn toggle_filter_value(&mut self, value: &CellValue) {
        if self.filter_values.contains(value) {
            self.filter_values.remove(value);
        } else {
            self.filter_values.insert(value.clone());
        }
        self.refresh();
    }

    /// Select every distinct value of the filter column.
    pub fn select_all(&mut self) {
        if let (Some(table), Some(col)) = (&self.table, &self.filter_column) {
            if let Some(all_vals) = table.unique_values.get(col) {
                self.filter_values = all_vals.clone();
            }
        }
        self.refresh();
    }

    /// Clear the selection ("no filter").
    pub fn select_none(&mut self) {
        self.filter_values = FilterSelection::new();
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn sample_table() -> Table {
        let records = vec![
            record(&[
                ("Vehicle Class", CellValue::String("SUV".into())),
                ("Fuel Type", CellValue::String("Z".into())),
                (
                    "Fuel Consumption Comb (L/100 km)",
                    CellValue::Float(10.0),
                ),
            ]),
            record(&[
                ("Vehicle Class", CellValue::String("Sedan".into())),
                ("Fuel Type", CellValue::String("X".into())),
                ("Fuel Consumption Comb (L/100 km)", CellValue::Float(6.0)),
            ]),
        ];
        Table::from_records(
            records,
            vec![
                "Vehicle Class".into(),
                "Fuel Type".into(),
                "Fuel Consumption Comb (L/100 km)".into(),
            ],
        )
    }

    #[test]
    fn defaults_follow_the_conventional_columns() {
        let mut state = AppState::default();
        state.set_table(sample_table());

        assert_eq!(state.group_column.as_deref(), Some("Vehicle Class"));
        assert_eq!(state.target_column.as_deref(), Some(DEFAULT_TARGET));
        assert_eq!(state.group_choices(), vec!["Vehicle Class", "Fuel Type"]);
        assert!(state.summary.is_some());
        assert_eq!(state.filtered.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn changing_filter_column_resets_selection() {
        let mut state = AppState::default();
        state.set_table(sample_table());

        state.toggle_filter_value(&CellValue::String("SUV".into()));
        assert_eq!(state.filter_values.len(), 1);
        assert_eq!(state.filtered.as_ref().unwrap().len(), 1);

        state.set_filter_column("Fuel Type".into());
        assert!(state.filter_values.is_empty());
        // Empty selection = no filter, full table again.
        assert_eq!(state.filtered.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn summary_tracks_the_filtered_subset() {
        let mut state = AppState::default();
        state.set_table(sample_table());
        state.set_filter_column("Vehicle Class".into());
        state.toggle_filter_value(&CellValue::String("Sedan".into()));

        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].0, CellValue::String("Sedan".into()));
        assert_eq!(summary.rows[0].1, 6.0);
    }
}
