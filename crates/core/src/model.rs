use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl Default for NodeId {
    fn default() -> Self {
        NodeId(0)
    }
}

/// One node of a dataset document as published: either a group
/// `{name, children}` or a leaf `{name, category, value}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DatasetNode>>,
}

impl DatasetNode {
    pub fn group(name: impl Into<String>, children: Vec<DatasetNode>) -> Self {
        Self {
            name: name.into(),
            category: None,
            value: None,
            children: Some(children),
        }
    }

    pub fn leaf(name: impl Into<String>, category: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            category: Some(category.into()),
            value: Some(value),
            children: None,
        }
    }
}

// The published files carry leaf values as numeric strings ("43150"),
// hand-written ones as plain numbers.
fn de_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Raw::Number(n)) => n,
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("value is not numeric: {s:?}")))?,
    };
    // Tile areas are proportional to values; only finite, non-negative ones tile.
    if !value.is_finite() || value < 0.0 {
        return Err(de::Error::custom(format!(
            "value must be a finite non-negative number, got {value}"
        )));
    }
    Ok(Some(value))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).max(0.0)
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True when the interiors overlap; touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    /// Dotted ancestor path, e.g. `Kickstarter.Product Design.Pebble Time`.
    pub path_id: String,
    pub name: String,
    pub category: Option<String>,
    pub value: Option<f64>,
    /// Sum of leaf values under this node (the leaf's own value for leaves).
    pub aggregate: f64,
    /// Distance to the deepest descendant leaf; 0 for leaves.
    pub height: u32,
    pub depth: u32,
    pub children: Vec<NodeId>,
    pub rect: Rect,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
