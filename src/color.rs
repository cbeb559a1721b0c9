//! Color space conversions shared by the catalog and the scanner.

use thiserror::Error;

/// Neutral gray used when a stored hex string no longer parses.
pub const PLACEHOLDER_RGB: (u8, u8, u8) = (142, 142, 147);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string did not reduce to 3, 6 or 8 hex digits.
    #[error("invalid hex color format: {0:?}")]
    InvalidFormat(String),
}

/// Uppercase `#RRGGBB` for 8-bit channels.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Parse a hex color string into RGBA channels.
///
/// Non-alphanumeric characters (`#`, whitespace, dashes) are stripped
/// before parsing. Three digits expand each nibble (x17), six digits imply
/// full opacity, eight digits are ARGB.
pub fn parse_hex(s: &str) -> Result<(u8, u8, u8, u8), ColorParseError> {
    let digits: String = s.chars().filter(|c| c.is_ascii_alphanumeric()).collect();

    let value = u32::from_str_radix(&digits, 16)
        .map_err(|_| ColorParseError::InvalidFormat(s.to_string()))?;

    match digits.len() {
        3 => Ok((
            (((value >> 8) & 0xF) * 17) as u8,
            (((value >> 4) & 0xF) * 17) as u8,
            ((value & 0xF) * 17) as u8,
            255,
        )),
        6 => Ok((
            (value >> 16) as u8,
            (value >> 8 & 0xFF) as u8,
            (value & 0xFF) as u8,
            255,
        )),
        8 => Ok((
            (value >> 16 & 0xFF) as u8,
            (value >> 8 & 0xFF) as u8,
            (value & 0xFF) as u8,
            (value >> 24) as u8,
        )),
        _ => Err(ColorParseError::InvalidFormat(s.to_string())),
    }
}

/// Parse a stored hex string, falling back to a neutral placeholder when
/// the value no longer parses (favorites written by older revisions).
pub fn parse_hex_or_placeholder(s: &str) -> (u8, u8, u8) {
    match parse_hex(s) {
        Ok((r, g, b, _)) => (r, g, b),
        Err(_) => PLACEHOLDER_RGB,
    }
}

/// RGB to CMYK, each component an integer percentage (truncated).
pub fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> (u8, u8, u8, u8) {
    let rf = f64::from(r) / 255.0;
    let gf = f64::from(g) / 255.0;
    let bf = f64::from(b) / 255.0;

    let k = 1.0 - rf.max(gf).max(bf);
    if k >= 1.0 {
        return (0, 0, 0, 100);
    }

    let c = (1.0 - rf - k) / (1.0 - k);
    let m = (1.0 - gf - k) / (1.0 - k);
    let y = (1.0 - bf - k) / (1.0 - k);

    (
        (c * 100.0) as u8,
        (m * 100.0) as u8,
        (y * 100.0) as u8,
        (k * 100.0) as u8,
    )
}

/// Display form `CMYK(c, m, y, k)`.
pub fn cmyk_label(r: u8, g: u8, b: u8) -> String {
    let (c, m, y, k) = rgb_to_cmyk(r, g, b);
    format!("CMYK({}, {}, {}, {})", c, m, y, k)
}

/// Display form `RGB(r, g, b)`.
pub fn rgb_label(r: u8, g: u8, b: u8) -> String {
    format!("RGB({}, {}, {})", r, g, b)
}

/// Text color readable over a given background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Black,
    White,
}

/// Pick a readable text color over an RGB background (channels in [0, 1]).
///
/// Luminance above 0.5 takes black text, everything else white. The
/// strict inequality is deliberate and matches what detail views expect.
pub fn contrasting_text_color(r: f64, g: f64, b: f64) -> TextColor {
    let luminance = 0.299 * r + 0.587 * g + 0.114 * b;
    if luminance > 0.5 {
        TextColor::Black
    } else {
        TextColor::White
    }
}
