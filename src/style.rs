//! Text style specification

use crate::error::{Error, Result};

/// Style applied to the stamped text. Immutable per batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSpec {
    /// Font identifier, resolved against the font catalog
    pub font: String,
    /// Font size in points
    pub size: u32,
    /// Fill color as RGB, each component in [0, 1]
    pub color: [f32; 3],
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            font: "Helvetica".to_string(),
            size: 24,
            color: [0.0, 0.0, 0.0],
        }
    }
}

/// Parse a `#rrggbb` hex color into an RGB triple in [0, 1].
pub fn parse_hex_color(s: &str) -> Result<[f32; 3]> {
    let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::General(format!("Invalid color {s:?}: expected #rrggbb")));
    }

    let component = |range: std::ops::Range<usize>| -> f32 {
        // Slice is validated hex above, the parse cannot fail
        u8::from_str_radix(&hex[range], 16).unwrap_or(0) as f32 / 255.0
    };

    Ok([component(0..2), component(2..4), component(4..6)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = StyleSpec::default();
        assert_eq!(style.font, "Helvetica");
        assert_eq!(style.size, 24);
        assert_eq!(style.color, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#000000").unwrap(), [0.0, 0.0, 0.0]);
        assert_eq!(parse_hex_color("#ffffff").unwrap(), [1.0, 1.0, 1.0]);
        assert_eq!(parse_hex_color("ff0000").unwrap(), [1.0, 0.0, 0.0]);

        let [r, g, b] = parse_hex_color("#336699").unwrap();
        assert!((r - 0x33 as f32 / 255.0).abs() < 1e-6);
        assert!((g - 0x66 as f32 / 255.0).abs() < 1e-6);
        assert!((b - 0x99 as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("red").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
    }
}
