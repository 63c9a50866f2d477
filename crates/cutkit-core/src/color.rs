//! Color handling and the named cut palette.
//!
//! Colors are plain RGB triples; opacity is carried separately by shape
//! style and applied when a backend pen or brush is derived.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The default cut palette: ten distinct hues cycled by cut count.
pub const DEFAULT_CUT_COLORS: [&str; 10] = [
    "green",
    "red",
    "blue",
    "cyan",
    "pink",
    "magenta",
    "orange",
    "violet",
    "turquoise",
    "yellow",
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const PINK: Color = Color::rgb(255, 192, 203);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const VIOLET: Color = Color::rgb(238, 130, 238);
    pub const TURQUOISE: Color = Color::rgb(64, 224, 208);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    /// Creates a color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Looks up a color by its X11-style name (case insensitive).
    pub fn from_name(name: &str) -> Option<Color> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "green" => Color::GREEN,
            "red" => Color::RED,
            "blue" => Color::BLUE,
            "cyan" => Color::CYAN,
            "pink" => Color::PINK,
            "magenta" => Color::MAGENTA,
            "orange" => Color::ORANGE,
            "violet" => Color::VIOLET,
            "turquoise" => Color::TURQUOISE,
            "yellow" => Color::YELLOW,
            _ => return None,
        };
        Some(color)
    }

    /// Packs this color into 0x00RRGGBB form.
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Unpacks a color from 0x00RRGGBB form.
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Resolves a list of color names into a palette.
///
/// Unknown names are dropped with a warning. An empty result falls back to
/// the default cut palette so callers always get a usable, non-empty
/// palette.
pub fn palette_from_names(names: &[String]) -> Vec<Color> {
    let mut palette = Vec::with_capacity(names.len());
    for name in names {
        match Color::from_name(name) {
            Some(color) => palette.push(color),
            None => warn!(name = name.as_str(), "unknown palette color, skipping"),
        }
    }
    if palette.is_empty() {
        warn!("palette resolved empty, using default cut colors");
        palette = DEFAULT_CUT_COLORS
            .iter()
            .filter_map(|n| Color::from_name(n))
            .collect();
    }
    palette
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Color::from_name("green"), Some(Color::GREEN));
        assert_eq!(Color::from_name("Cyan"), Some(Color::CYAN));
        assert_eq!(Color::from_name("mauve"), None);
    }

    #[test]
    fn test_packed_round_trip() {
        let c = Color::TURQUOISE;
        assert_eq!(Color::from_packed(c.to_packed()), c);
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_packed(), 0x123456);
    }

    #[test]
    fn test_default_palette_resolves_fully() {
        let names: Vec<String> = DEFAULT_CUT_COLORS.iter().map(|s| s.to_string()).collect();
        let palette = palette_from_names(&names);
        assert_eq!(palette.len(), 10);
        assert_eq!(palette[0], Color::GREEN);
        assert_eq!(palette[3], Color::CYAN);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let names = vec!["nope".to_string(), "nada".to_string()];
        let palette = palette_from_names(&names);
        assert_eq!(palette.len(), 10);
    }
}
