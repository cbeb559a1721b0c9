//! Photo scanning: dominant-palette extraction and single-point sampling.

pub mod extract;
pub mod sample;
pub mod session;

use serde::{Deserialize, Serialize};

use crate::color;

/// A color lifted out of a photo, either by palette extraction or by
/// sampling a single point.
///
/// The hex and CMYK strings are derived from the channels at construction
/// so the representations cannot drift. Not persisted unless favorited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledColor {
    /// Channel values in [0, 1].
    pub rgb: (f64, f64, f64),
    /// Display hex, `#RRGGBB`.
    pub hex: String,
    /// Display CMYK, `CMYK(c, m, y, k)`.
    pub cmyk: String,
    /// Share of retained pixels this color covers, 0 for point samples.
    pub percentage: f64,
}

impl SampledColor {
    /// Build a sample from unit-range channels, deriving the display forms.
    pub fn new(r: f64, g: f64, b: f64, percentage: f64) -> Self {
        let (r8, g8, b8) = ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8);
        Self {
            rgb: (r, g, b),
            hex: color::rgb_to_hex(r8, g8, b8),
            cmyk: color::cmyk_label(r8, g8, b8),
            percentage,
        }
    }

    /// 8-bit view of the channels.
    pub fn rgb8(&self) -> (u8, u8, u8) {
        (
            (self.rgb.0 * 255.0) as u8,
            (self.rgb.1 * 255.0) as u8,
            (self.rgb.2 * 255.0) as u8,
        )
    }

    /// Display form `RGB(r, g, b)`.
    pub fn rgb_label(&self) -> String {
        let (r, g, b) = self.rgb8();
        color::rgb_label(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_display_strings_from_channels() {
        let c = SampledColor::new(1.0, 0.0, 0.0, 42.0);
        assert_eq!(c.hex, "#FF0000");
        assert_eq!(c.cmyk, "CMYK(0, 100, 100, 0)");
        assert_eq!(c.rgb_label(), "RGB(255, 0, 0)");
        assert_eq!(c.percentage, 42.0);
    }

    #[test]
    fn identical_channels_produce_identical_samples() {
        let a = SampledColor::new(0.25, 0.5, 0.75, 0.0);
        let b = SampledColor::new(0.25, 0.5, 0.75, 0.0);
        assert_eq!(a, b);
    }

    #[test]
    fn serde_round_trip() {
        let c = SampledColor::new(0.25, 0.5, 0.75, 12.5);
        let json = serde_json::to_string(&c).unwrap();
        let back: SampledColor = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
