use serde::Serialize;

use crate::human::format_value;

pub const VISIBLE_OPACITY: f64 = 0.9;
/// Offset from the pointer's page position to the tooltip's top-left.
pub const POINTER_OFFSET: (f64, f64) = (10.0, -28.0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub name: String,
    pub category: String,
    pub value: f64,
}

impl TooltipContent {
    /// Missing fields display as an empty category and a zero value.
    pub fn new(name: &str, category: Option<&str>, value: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            category: category.unwrap_or_default().to_string(),
            value: value.filter(|v| v.is_finite()).unwrap_or(0.0),
        }
    }

    /// Value exposed as the tooltip's `data-value` attribute.
    pub fn data_value(&self) -> String {
        self.value.to_string()
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("Name: {}", self.name),
            format!("Category: {}", self.category),
            format!("Value: {}", format_value(self.value)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state")]
pub enum Tooltip {
    #[default]
    Hidden,
    Visible {
        content: TooltipContent,
        position: (f64, f64),
    },
}

impl Tooltip {
    /// Pointer moved over a cell. Last event wins.
    pub fn on_pointer_move(&mut self, content: TooltipContent, page_x: f64, page_y: f64) {
        *self = Tooltip::Visible {
            content,
            position: (page_x + POINTER_OFFSET.0, page_y + POINTER_OFFSET.1),
        };
    }

    pub fn on_pointer_out(&mut self) {
        *self = Tooltip::Hidden;
    }

    pub fn opacity(&self) -> f64 {
        match self {
            Tooltip::Hidden => 0.0,
            Tooltip::Visible { .. } => VISIBLE_OPACITY,
        }
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        match self {
            Tooltip::Hidden => None,
            Tooltip::Visible { content, .. } => Some(content),
        }
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Tooltip::Hidden => None,
            Tooltip::Visible { position, .. } => Some(*position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wii_sports() -> TooltipContent {
        TooltipContent::new("Wii Sports", Some("Wii"), Some(82.53))
    }

    #[test]
    fn starts_hidden_then_shows_and_hides() {
        let mut t = Tooltip::default();
        assert_eq!(t.opacity(), 0.0);
        t.on_pointer_move(wii_sports(), 100.0, 200.0);
        assert_eq!(t.opacity(), 0.9);
        assert_eq!(t.position(), Some((110.0, 172.0)));
        assert_eq!(t.content().map(|c| c.data_value()), Some("82.53".to_string()));
        t.on_pointer_out();
        assert_eq!(t.opacity(), 0.0);
        assert!(t.content().is_none());
    }

    #[test]
    fn last_move_wins() {
        let mut t = Tooltip::default();
        t.on_pointer_move(wii_sports(), 0.0, 0.0);
        t.on_pointer_move(TooltipContent::new("Tetris", Some("GB"), Some(30.26)), 5.0, 50.0);
        assert_eq!(t.content().unwrap().name, "Tetris");
        assert_eq!(t.position(), Some((15.0, 22.0)));
    }

    #[test]
    fn missing_fields_display_as_defaults() {
        let c = TooltipContent::new("Orphan", None, None);
        assert_eq!(c.category, "");
        assert_eq!(c.data_value(), "0");
        assert_eq!(c.lines()[2], "Value: 0");
    }
}
