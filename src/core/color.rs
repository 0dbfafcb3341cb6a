use serde::Deserialize;
use std::fmt;

/// 8-bit RGBA color. Config files may spell it as `"#RRGGBB"`, `"#RRGGBBAA"`,
/// `(r, g, b)` or `(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(format!("expected #RRGGBB or #RRGGBBAA, got {s:?}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("bad hex color {s:?}: {e}"))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(p: image::Rgba<u8>) -> Self {
        Self::rgba(p[0], p[1], p[2], p[3])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8),
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;
    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(s) => Color::from_hex(&s),
            ColorRepr::Rgb(r, g, b) => Ok(Color::rgb(r, g, b)),
            ColorRepr::Rgba(r, g, b, a) => Ok(Color::rgba(r, g, b, a)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grade_hex_literals() {
        assert_eq!(Color::from_hex("#F7F7F2").unwrap(), Color::rgb(0xF7, 0xF7, 0xF2));
        assert_eq!(Color::from_hex("EDEDB0").unwrap(), Color::rgb(0xED, 0xED, 0xB0));
        assert_eq!(Color::from_hex("#F0F0FFDC").unwrap(), Color::rgba(240, 240, 255, 220));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#F7F7").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#ÄÄÄ").is_err());
    }

    #[test]
    fn ron_accepts_all_spellings() {
        let hex: Color = ron::from_str("\"#C4A265\"").unwrap();
        let tuple: Color = ron::from_str("(196, 162, 101)").unwrap();
        let quad: Color = ron::from_str("(196, 162, 101, 128)").unwrap();
        assert_eq!(hex, tuple);
        assert_eq!(quad, tuple.with_alpha(128));
        assert_eq!(hex.to_string(), "#C4A265");
        assert_eq!(quad.to_string(), "#C4A26580");
    }
}
