use serde::{Deserialize, Serialize};

use crate::color::ColorScale;
use crate::dataset::DatasetDescriptor;
use crate::dimensions::{ChartDimensions, Margins};
use crate::hierarchy::Hierarchy;
use crate::label::split_label;
use crate::legend::Legend;
use crate::model::{NodeId, Rect};
use crate::tooltip::TooltipContent;
use crate::treemap::Tiling;

pub const PADDING_INNER: f64 = 1.0;
pub const LABEL_X: f64 = 4.0;
pub const LABEL_TOP: f64 = 13.0;
pub const LABEL_STEP: f64 = 10.0;

/// Everything a render pass needs from its host, passed in explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Dataset query key, resolved by [`crate::pipeline::render`]; unknown or
    /// absent keys use the default dataset. Callers of [`ChartLayout::compute`]
    /// pass the descriptor directly and leave this unset.
    pub dataset: Option<String>,
    /// Measured width of the host container, in pixels.
    pub container_width: f64,
    pub margins: Margins,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            container_width: 1020.0,
            margins: Margins::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextItem {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
}

/// Title and description, centred above the chart area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub title: TextItem,
    pub description: TextItem,
}

impl Header {
    pub fn compute(dims: &ChartDimensions, dataset: &DatasetDescriptor) -> Self {
        let cx = dims.width / 2.0;
        Self {
            title: TextItem {
                text: dataset.title.to_string(),
                x: cx,
                y: -dims.margins.top / 2.0,
                font_size: (dims.width / 25.0).min(14.0),
            },
            description: TextItem {
                text: dataset.description.to_string(),
                x: cx,
                y: -10.0,
                font_size: (dims.width / 40.0).min(10.0),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// One leaf tile, with everything the apply stage draws for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub index: usize,
    pub node: NodeId,
    pub path_id: String,
    pub name: String,
    pub category: Option<String>,
    pub value: Option<f64>,
    pub rect: Rect,
    pub fill: &'static str,
    pub clip_id: String,
    pub font_size: f64,
    /// Label lines relative to the tile's top-left corner.
    pub lines: Vec<LabelLine>,
}

impl Cell {
    pub fn tooltip(&self) -> TooltipContent {
        TooltipContent::new(&self.name, self.category.as_deref(), self.value)
    }

    pub fn category_str(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub dataset: DatasetDescriptor,
    pub dims: ChartDimensions,
    pub header: Header,
    pub cells: Vec<Cell>,
    pub legend: Legend,
    pub total: f64,
}

impl ChartLayout {
    /// Tiles `tree` and derives every drawable attribute. A degenerate
    /// drawing area yields a chart with no cells and no legend entries.
    pub fn compute(
        dataset: &DatasetDescriptor,
        tree: &mut Hierarchy,
        config: &RenderConfig,
        tiler: &dyn Tiling,
    ) -> Self {
        let dims = ChartDimensions::compute(config.container_width, config.margins);
        let header = Header::compute(&dims, dataset);
        let total = tree.total();

        if dims.is_degenerate() {
            tracing::warn!(
                container_width = config.container_width,
                width = dims.width,
                "container too narrow, rendering an empty chart"
            );
            return Self {
                dataset: dataset.clone(),
                dims,
                header,
                cells: Vec::new(),
                legend: Legend::compute(&dims, &ColorScale::default()),
                total,
            };
        }

        tiler.tile(tree, dims.width, dims.height, PADDING_INNER);

        let leaves = tree.leaves();
        let scale = ColorScale::from_categories(
            leaves.iter().map(|n| n.category.as_deref().unwrap_or_default()),
        );
        let font_size = (dims.width / 100.0).max(6.0);
        let cells: Vec<Cell> = leaves
            .iter()
            .enumerate()
            .map(|(index, leaf)| Cell {
                index,
                node: leaf.id,
                path_id: leaf.path_id.clone(),
                name: leaf.name.clone(),
                category: leaf.category.clone(),
                value: leaf.value,
                rect: leaf.rect,
                fill: scale.color_of(leaf.category.as_deref().unwrap_or_default()),
                clip_id: format!("clip-{index}"),
                font_size,
                lines: split_label(&leaf.name)
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| LabelLine {
                        text: text.to_string(),
                        x: LABEL_X,
                        y: LABEL_TOP + i as f64 * LABEL_STEP,
                    })
                    .collect(),
            })
            .collect();
        let legend = Legend::compute(&dims, &scale);

        tracing::debug!(
            dataset = %dataset.key,
            cells = cells.len(),
            categories = legend.entries.len(),
            width = dims.width,
            height = dims.height,
            "computed chart layout"
        );
        Self {
            dataset: dataset.clone(),
            dims,
            header,
            cells,
            legend,
            total,
        }
    }

    /// Topmost cell under a chart-local point.
    pub fn hit(&self, x: f64, y: f64) -> Option<&Cell> {
        self.cells
            .iter()
            .rev()
            .find(|c| c.rect.area() > 0.0 && c.rect.contains(x, y))
    }
}
