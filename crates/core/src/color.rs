use std::collections::HashMap;

/// The ten-colour categorical palette used for tiles and legend swatches.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Ordinal scale: the n-th distinct category seen gets palette entry
/// `n % 10`. Built once per render and shared by cells and legend.
#[derive(Debug, Clone, Default)]
pub struct ColorScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColorScale {
    pub fn from_categories<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
        let mut scale = Self::default();
        for c in categories {
            if !scale.index.contains_key(c) {
                scale.index.insert(c.to_string(), scale.domain.len());
                scale.domain.push(c.to_string());
            }
        }
        scale
    }

    /// Distinct categories in first-seen order.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn color_of(&self, category: &str) -> &'static str {
        // Categories outside the domain share the slot after the last known one.
        let i = self.index.get(category).copied().unwrap_or(self.domain.len());
        CATEGORY10[i % CATEGORY10.len()]
    }

    /// `#rrggbb` as bytes, for non-SVG painters.
    pub fn rgb_of(&self, category: &str) -> [u8; 3] {
        parse_hex(self.color_of(category)).unwrap_or([0, 0, 0])
    }
}

pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let h = hex.strip_prefix('#')?;
    if h.len() != 6 {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).ok();
    Some([byte(0)?, byte(2)?, byte(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_order_and_wrap() {
        let cats: Vec<String> = (0..12).map(|i| format!("c{i}")).collect();
        let scale = ColorScale::from_categories(cats.iter().map(String::as_str));
        assert_eq!(scale.color_of("c0"), "#1f77b4");
        assert_eq!(scale.color_of("c9"), "#17becf");
        assert_eq!(scale.color_of("c10"), scale.color_of("c0"));
        assert_eq!(scale.domain().len(), 12);
    }

    #[test]
    fn duplicates_keep_their_first_slot() {
        let scale = ColorScale::from_categories(["Wii", "GB", "Wii", "DS"]);
        assert_eq!(scale.domain(), ["Wii", "GB", "DS"]);
        assert_eq!(scale.color_of("DS"), CATEGORY10[2]);
        assert_eq!(scale.color_of("Wii"), scale.color_of("Wii"));
    }

    #[test]
    fn hex_to_rgb() {
        assert_eq!(parse_hex("#ff7f0e"), Some([255, 127, 14]));
        assert_eq!(parse_hex("ff7f0e"), None);
        let scale = ColorScale::from_categories(["a"]);
        assert_eq!(scale.rgb_of("a"), [0x1f, 0x77, 0xb4]);
    }
}
