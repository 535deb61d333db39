//! Color parsing and formatting for terrain legend hex strings
//!
//! Supports the following formats, with or without a leading `#`:
//! - `RGB`, `RGBA` (each digit doubled)
//! - `RRGGBB` (alpha defaults to 255)
//! - `RRGGBBAA`
//!
//! Colors are always written back as uppercase `#RRGGBBAA`.

use image::Rgba;
use thiserror::Error;

/// The zero color: fully transparent black.
///
/// Used for the default terrain descriptor and as the substitute for
/// legend colors that fail to parse.
pub const BLANK: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars, excluding the '#')
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse a hex color string into an RGBA color.
///
/// # Examples
///
/// ```
/// use geomap::color::parse_hex;
///
/// let sand = parse_hex("#C2B280").unwrap();
/// assert_eq!(sand, image::Rgba([194, 178, 128, 255]));
///
/// let glass = parse_hex("00ff0080").unwrap();
/// assert_eq!(glass, image::Rgba([0, 255, 0, 128]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is empty, has the wrong number of
/// digits, or contains a non-hex character.
pub fn parse_hex(s: &str) -> Result<Rgba<u8>, ColorError> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.is_empty() {
        return Err(ColorError::Empty);
    }

    // Validate all characters are hex
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    let digits: Vec<u8> = hex.bytes().map(hex_value).collect();

    match digits.as_slice() {
        // RGB -> RRGGBB (doubled digits), alpha = 255
        &[r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, 255])),
        &[r, g, b, a] => Ok(Rgba([r * 17, g * 17, b * 17, a * 17])),
        &[r1, r2, g1, g2, b1, b2] => Ok(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, 255])),
        &[r1, r2, g1, g2, b1, b2, a1, a2] => {
            Ok(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, a1 * 16 + a2]))
        }
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

/// Parse a hex color, degrading to [`BLANK`] when it is malformed.
pub fn parse_hex_or_blank(s: &str) -> Rgba<u8> {
    parse_hex(s).unwrap_or(BLANK)
}

/// Format a color as uppercase `#RRGGBBAA`.
///
/// ```
/// use geomap::color::format_hex;
///
/// assert_eq!(format_hex(image::Rgba([194, 178, 128, 255])), "#C2B280FF");
/// ```
pub fn format_hex(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
}

/// Value of an ASCII hex digit. Callers validate the digit first.
fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}
