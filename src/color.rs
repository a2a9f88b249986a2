use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: group key → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of the grouping column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub column: String,
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the given column from its unique values.
    pub fn new(column: &str, unique_values: &BTreeSet<CellValue>) -> Self {
        let palette = generate_palette(unique_values.len());
        let mapping: BTreeMap<CellValue, Color32> = unique_values
            .iter()
            .zip(palette.into_iter())
            .map(|(v, c): (&CellValue, Color32)| (v.clone(), c))
            .collect();

        ColorMap {
            column: column.to_string(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given group key.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging colormap for the correlation heatmap
// ---------------------------------------------------------------------------

/// Map a Pearson coefficient in [-1, 1] to a blue–white–red diverging colour.
/// NaN renders as gray ("no data").
pub fn correlation_color(r: f64) -> Color32 {
    if r.is_nan() {
        return Color32::GRAY;
    }
    let t = (r.clamp(-1.0, 1.0) as f32 + 1.0) / 2.0;

    let cold = Srgb::new(0.23f32, 0.30, 0.75);
    let white = Srgb::new(0.97f32, 0.97, 0.97);
    let warm = Srgb::new(0.75f32, 0.22, 0.17);

    fn lerp(a: Srgb, b: Srgb, t: f32) -> Srgb {
        Srgb::new(
            a.red + (b.red - a.red) * t,
            a.green + (b.green - a.green) * t,
            a.blue + (b.blue - a.blue) * t,
        )
    }

    let rgb = if t < 0.5 {
        lerp(cold, white, t * 2.0)
    } else {
        lerp(white, warm, (t - 0.5) * 2.0)
    };

    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn correlation_color_extremes() {
        let neg = correlation_color(-1.0);
        let pos = correlation_color(1.0);
        let nan = correlation_color(f64::NAN);
        assert!(neg.b() > neg.r());
        assert!(pos.r() > pos.b());
        assert_eq!(nan, Color32::GRAY);
    }
}
