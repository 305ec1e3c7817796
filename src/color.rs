use std::collections::BTreeMap;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Fixed chart colours
// ---------------------------------------------------------------------------

pub const BAR_FILL: &str = "#69b3a2";
pub const LINE_STROKE: &str = "#ff6600";
pub const LINE_POINT: &str = "#ff0000";
pub const BUBBLE_FILL: &str = "#66ccff";
pub const AREA_FILL: &str = "#b0c4de";
pub const SCATTER_FILL: &str = "#ff6666";
pub const MARKER_FILL: &str = "#d62728";

/// The classic ten-colour categorical scheme.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Parse `#rrggbb`; unparseable input falls back to gray.
pub fn hex_to_color32(hex: &str) -> Color32 {
    match Srgb::<u8>::from_str(hex) {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(_) => {
            log::warn!("invalid colour {hex:?}");
            Color32::GRAY
        }
    }
}

pub fn color32_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

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
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Assigns each distinct label a colour in first-seen order. Up to ten
/// labels use [`CATEGORY10`]; larger sets get an evenly spaced palette.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut unique: Vec<&str> = Vec::new();
        for label in labels {
            if !unique.contains(&label) {
                unique.push(label);
            }
        }

        let colors: Vec<Color32> = if unique.len() <= CATEGORY10.len() {
            CATEGORY10.iter().map(|hex| hex_to_color32(hex)).collect()
        } else {
            generate_palette(unique.len())
        };

        let mapping = unique
            .into_iter()
            .zip(colors)
            .map(|(label, color)| (label.to_string(), color))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }

    pub fn hex_for(&self, label: &str) -> String {
        color32_to_hex(self.color_for(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colours() {
        assert_eq!(hex_to_color32("#69b3a2"), Color32::from_rgb(0x69, 0xb3, 0xa2));
        assert_eq!(hex_to_color32("not a colour"), Color32::GRAY);
        assert_eq!(color32_to_hex(Color32::from_rgb(255, 102, 0)), "#ff6600");
    }

    #[test]
    fn small_sets_use_category_scheme() {
        let map = ColorMap::new(["France", "Japan", "France"]);
        assert_eq!(map.hex_for("France"), CATEGORY10[0]);
        assert_eq!(map.hex_for("Japan"), CATEGORY10[1]);
        assert_eq!(map.color_for("Peru"), Color32::GRAY);
    }

    #[test]
    fn large_sets_stay_distinct() {
        let labels: Vec<String> = (0..12).map(|i| format!("Country {i}")).collect();
        let map = ColorMap::new(labels.iter().map(String::as_str));
        let first = map.color_for("Country 0");
        assert!(labels[1..].iter().all(|l| map.color_for(l) != first));
    }

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(12).len(), 12);
    }
}
