/// UI layer: panels, charts, and tabular views.  Pure rendering over
/// [`crate::state::AppState`]; all computation lives in `crate::data`.
pub mod heatmap;
pub mod panels;
pub mod plot;
pub mod tables;
