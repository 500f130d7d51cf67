use serde::{Deserialize, Serialize};

pub const ASPECT_RATIO: f64 = 0.8;
pub const MAX_WIDTH: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 60.0,
            right: 10.0,
            bottom: 100.0,
            left: 10.0,
        }
    }
}

/// Chart-local drawing area derived from the host container width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl ChartDimensions {
    /// `width` may come out zero or negative for narrow containers; callers
    /// check [`ChartDimensions::is_degenerate`] and draw nothing.
    pub fn compute(container_width: f64, margins: Margins) -> Self {
        let width = (container_width - margins.left - margins.right).min(MAX_WIDTH);
        Self {
            width,
            height: width * ASPECT_RATIO,
            margins,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Outer surface size: drawing area plus margins.
    pub fn view_box(&self) -> (f64, f64) {
        (
            self.width + self.margins.left + self.margins.right,
            self.height + self.margins.top + self.margins.bottom,
        )
    }
}
