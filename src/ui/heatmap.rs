use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Ui, Vec2};

use crate::color::correlation_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Correlation heatmap (numeric columns, pairwise Pearson)
// ---------------------------------------------------------------------------

const LABEL_WIDTH: f32 = 170.0;
const HEADER_HEIGHT: f32 = 18.0;

/// Render the correlation matrix as a coloured grid.  Rows carry the full
/// column names; column headers are numbered to keep the grid compact (the
/// matrix is symmetric, so the row labels identify both axes).
pub fn correlation_heatmap(ui: &mut Ui, state: &AppState) {
    let Some(matrix) = &state.correlation else {
        ui.label("No numeric columns to correlate.");
        return;
    };
    if matrix.is_empty() {
        ui.label("No numeric columns to correlate.");
        return;
    }

    let n = matrix.len();
    let avail = ui.available_width();
    let cell = ((avail - LABEL_WIDTH) / n as f32).clamp(28.0, 64.0);

    let size = Vec2::new(
        LABEL_WIDTH + cell * n as f32,
        HEADER_HEIGHT + cell * n as f32,
    );
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.left_top();
    let grid_origin = origin + Vec2::new(LABEL_WIDTH, HEADER_HEIGHT);

    let text_color = ui.visuals().text_color();

    // Numbered column headers.
    for j in 0..n {
        painter.text(
            Pos2::new(
                grid_origin.x + (j as f32 + 0.5) * cell,
                origin.y + HEADER_HEIGHT * 0.5,
            ),
            Align2::CENTER_CENTER,
            format!("{}", j + 1),
            FontId::proportional(11.0),
            text_color,
        );
    }

    for i in 0..n {
        // Row label: "1  Engine Size(L)".
        painter.text(
            Pos2::new(origin.x, grid_origin.y + (i as f32 + 0.5) * cell),
            Align2::LEFT_CENTER,
            format!("{}  {}", i + 1, matrix.columns[i]),
            FontId::proportional(11.0),
            text_color,
        );

        for j in 0..n {
            let r = matrix.get(i, j);
            let rect = Rect::from_min_size(
                Pos2::new(
                    grid_origin.x + j as f32 * cell,
                    grid_origin.y + i as f32 * cell,
                ),
                Vec2::splat(cell),
            );
            painter.rect_filled(rect.shrink(1.0), 2, correlation_color(r));

            let label = if r.is_nan() {
                "–".to_string()
            } else {
                format!("{r:.2}")
            };
            let ink = if r.abs() > 0.6 {
                Color32::WHITE
            } else {
                Color32::from_gray(40)
            };
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(10.0),
                ink,
            );
        }
    }

    // Hover tooltip with the full column pair.
    if let Some(pos) = response.hover_pos() {
        let dx = pos.x - grid_origin.x;
        let dy = pos.y - grid_origin.y;
        if dx >= 0.0 && dy >= 0.0 {
            let j = (dx / cell) as usize;
            let i = (dy / cell) as usize;
            if i < n && j < n {
                let r = matrix.get(i, j);
                response.clone().on_hover_text(format!(
                    "{} × {}: {:.3}",
                    matrix.columns[i], matrix.columns[j], r
                ));
            }
        }
    }
}
