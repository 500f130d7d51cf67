pub mod chart;
pub mod color;
pub mod dataset;
pub mod dimensions;
pub mod error;
pub mod export;
pub mod hierarchy;
pub mod html;
pub mod human;
pub mod label;
pub mod legend;
pub mod loader;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod svg;
pub mod tooltip;
pub mod treemap;

pub use chart::*;
pub use error::{ChartError, Result};
pub use model::*;
pub use pipeline::*;
