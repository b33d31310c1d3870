//! sRGB colours for category tinting and line strokes.

use crate::error::FieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB colour with 8-bit channels.
///
/// Serializes as `"#rrggbb"`, which is how category colours are authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Srgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Srgb {
    /// Colour from 8-bit channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `"#rrggbb"` or `"rrggbb"`, case insensitive.
    pub fn from_hex(hex: &str) -> Result<Srgb, FieldError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(FieldError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| FieldError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba(r, g, b, a)` string; `alpha` is clamped to [0, 1].
    pub fn to_css_rgba(self, alpha: f64) -> String {
        let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, a)
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_accent_with_and_without_hash() {
        let lime = Srgb::new(0xc8, 0xff, 0x00);
        assert_eq!(Srgb::from_hex("#c8ff00").unwrap(), lime);
        assert_eq!(Srgb::from_hex("C8FF00").unwrap(), lime);
    }

    #[test]
    fn rejects_short_and_non_hex() {
        assert!(matches!(
            Srgb::from_hex("#fff"),
            Err(FieldError::InvalidColor(_))
        ));
        assert!(matches!(
            Srgb::from_hex("#gg0000"),
            Err(FieldError::InvalidColor(_))
        ));
    }

    #[test]
    fn rejects_multibyte_input_without_panicking() {
        assert!(Srgb::from_hex("#ééé").is_err());
    }

    #[test]
    fn css_rgba_formats_and_clamps_alpha() {
        let blue = Srgb::from_hex("#60a5fa").unwrap();
        assert_eq!(blue.to_css_rgba(0.25), "rgba(96, 165, 250, 0.250)");
        assert_eq!(blue.to_css_rgba(3.0), "rgba(96, 165, 250, 1.000)");
        assert_eq!(blue.to_css_rgba(f64::NAN), "rgba(96, 165, 250, 0.000)");
    }

    #[test]
    fn serializes_as_hex_string() {
        let pink = Srgb::from_hex("#f472b6").unwrap();
        let json = serde_json::to_string(&pink).unwrap();
        assert_eq!(json, "\"#f472b6\"");
        let back: Srgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pink);
    }
}
