//! Color string handling for the wire format.
//!
//! Operations carry colors as `#RRGGBB` strings, so parsing must tolerate
//! junk from remote peers: a string that does not parse yields `None` and
//! the caller drops the operation's visual effect without failing.

use image::Rgba;

/// Parse a `#RRGGBB` hex color (leading `#` optional, case-insensitive)
/// into an opaque RGBA pixel.  Returns `None` for anything else.
pub fn parse_hex(color: &str) -> Option<Rgba<u8>> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgba([r, g, b, 255]))
}

/// Scale a pixel's alpha by `alpha` in `[0, 1]`.
pub fn with_alpha(color: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let a = (color[3] as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
    Rgba([color[0], color[1], color[2], a])
}

/// Format a sampled pixel as a `rgba(r, g, b, a)` string, the shape the
/// pipette reports to the shell (alpha normalized to `[0, 1]`).
pub fn css_rgba(pixel: Rgba<u8>) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        pixel[0],
        pixel[1],
        pixel[2],
        pixel[3] as f32 / 255.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(parse_hex("#E53935"), Some(Rgba([229, 57, 53, 255])));
        assert_eq!(parse_hex("1e88e5"), Some(Rgba([30, 136, 229, 255])));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert_eq!(parse_hex(""), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#12345g"), None);
        assert_eq!(parse_hex("not-a-color"), None);
    }

    #[test]
    fn formats_css_rgba() {
        assert_eq!(css_rgba(Rgba([255, 0, 128, 255])), "rgba(255, 0, 128, 1)");
        assert_eq!(css_rgba(Rgba([0, 0, 0, 0])), "rgba(0, 0, 0, 0)");
    }
}
