use serde::Serialize;

use crate::color::ColorScale;
use crate::dimensions::ChartDimensions;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: String,
    pub color: &'static str,
    pub row: usize,
    pub col: usize,
    /// Offset of the item inside the legend group.
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    /// Legend group origin in chart-local coordinates.
    pub origin: (f64, f64),
    pub swatch_size: f64,
    pub text_size: f64,
    pub spacing: f64,
    pub per_row: usize,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Wraps one swatch per category of `scale` into rows that fit the
    /// chart width, in first-seen category order.
    pub fn compute(dims: &ChartDimensions, scale: &ColorScale) -> Self {
        let swatch_size = (dims.width / 100.0).max(14.0);
        let text_size = (dims.width / 100.0).max(10.0);
        let spacing = swatch_size * 10.0;
        let per_row = ((dims.width / spacing).floor() as usize).max(1);
        let entries = scale
            .domain()
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let (row, col) = (i / per_row, i % per_row);
                LegendEntry {
                    category: category.clone(),
                    color: scale.color_of(category),
                    row,
                    col,
                    x: col as f64 * spacing,
                    y: row as f64 * (swatch_size + 5.0),
                }
            })
            .collect();
        Self {
            origin: (0.0, dims.height + 20.0),
            swatch_size,
            text_size,
            spacing,
            per_row,
            entries,
        }
    }

    pub fn rows(&self) -> usize {
        self.entries.last().map(|e| e.row + 1).unwrap_or(0)
    }
}
