//! RGBA color used by every gauge surface.
//!
//! Colors deserialize either from the `{ r, g, b, a }` object form or from a
//! `#RRGGBB` / `#AARRGGBB` hex string, so hand-written config files can use
//! the same notation as resource color values.

use serde::{Deserialize, Deserializer, Serialize};

/// RGBA color with alpha channel
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// 0xFF444444
    pub const DARK_GRAY: Color = Color::new(68.0 / 255.0, 68.0 / 255.0, 68.0 / 255.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    /// Packed `0xAARRGGBB` color int.
    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_rgba8(r, g, b, a)
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self::from_argb(0xFF00_0000 | value)),
            8 => Some(Self::from_argb(value)),
            _ => None,
        }
    }

    /// Apply to Cairo context
    #[cfg(feature = "gtk")]
    pub fn apply_to_cairo(&self, cr: &cairo::Context) {
        cr.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Rgba { r: f64, g: f64, b: f64, a: f64 },
    Hex(String),
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match ColorRepr::deserialize(deserializer)? {
            ColorRepr::Rgba { r, g, b, a } => Ok(Color::new(r, g, b, a)),
            ColorRepr::Hex(hex) => Color::from_hex(&hex).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid color '{}', expected #RRGGBB or #AARRGGBB", hex))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#FFFFFF"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("FF000000"), Some(Color::BLACK));
        assert_eq!(Color::from_hex("#FF444444"), Some(Color::DARK_GRAY));
        assert_eq!(Color::from_hex("#80FF0000").map(|c| c.to_rgba8()), Some((255, 0, 0, 128)));
        assert!(Color::from_hex("#FFF").is_none());
        assert!(Color::from_hex("#GG0000").is_none());
    }

    #[test]
    fn test_deserialize_both_forms() {
        let object: Color = serde_json::from_str(r#"{"r":1.0,"g":0.0,"b":0.0,"a":1.0}"#).unwrap();
        let hex: Color = serde_json::from_str(r##""#FF0000""##).unwrap();
        assert_eq!(object, hex);

        let bad = serde_json::from_str::<Color>(r#""red""#);
        assert!(bad.is_err());
    }
}
