use serde::{de, Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

fn default_one() -> f32 {
    1.0
}

fn is_one(num: &f32) -> bool {
    *num == 1.0
}

/// An sRGB color with straight (non-premultiplied) alpha in `0.0..=1.0`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(skip_serializing_if = "is_one", default = "default_one")]
    pub a: f32,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.r.hash(state);
        self.g.hash(state);
        self.b.hash(state);
        self.a.to_bits().hash(state);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0, g: 0, b: 0, a: 1.0 }
    }
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("transparent", Color { r: 0, g: 0, b: 0, a: 0.0 }),
];

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// The color as `[r, g, b, a]` bytes, alpha scaled to `0..=255`.
    pub fn rgba_bytes(&self) -> [u8; 4] {
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, a]
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Parse a hex color string (#RGB, #RGBA, #RRGGBB or #RRGGBBAA)
    fn parse_hex(s: &str) -> Result<Color, String> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Color must start with #, got: {}", s))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex digits in color '{}'", s));
        }

        let channel = |digits: &str, name: &str| -> Result<u8, String> {
            let digits = if digits.len() == 1 { digits.repeat(2) } else { digits.to_string() };
            u8::from_str_radix(&digits, 16)
                .map_err(|e| format!("Invalid {} component in '{}': {}", name, s, e))
        };

        match hex.len() {
            3 | 4 => {
                let r = channel(&hex[0..1], "red")?;
                let g = channel(&hex[1..2], "green")?;
                let b = channel(&hex[2..3], "blue")?;
                let a = if hex.len() == 4 { channel(&hex[3..4], "alpha")? } else { 255 };
                Ok(Color { r, g, b, a: a as f32 / 255.0 })
            }
            6 | 8 => {
                let r = channel(&hex[0..2], "red")?;
                let g = channel(&hex[2..4], "green")?;
                let b = channel(&hex[4..6], "blue")?;
                let a = if hex.len() == 8 { channel(&hex[6..8], "alpha")? } else { 255 };
                Ok(Color { r, g, b, a: a as f32 / 255.0 })
            }
            n => Err(format!("Invalid hex color length: expected 3, 4, 6 or 8, got {}", n)),
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::parse_hex(s);
        }
        let lower = s.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, c)| *c)
            .ok_or_else(|| format!("Unknown color: '{}'", s))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Map { r: u8, g: u8, b: u8, #[serde(default = "default_one")] a: f32 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => s.parse().map_err(de::Error::custom),
            ColorDef::Map { r, g, b, a } => Ok(Color { r, g, b, a }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_long_hex() {
        assert_eq!("#f00".parse::<Color>().unwrap(), Color::rgb(255, 0, 0));
        assert_eq!("#00ff80".parse::<Color>().unwrap(), Color::rgb(0, 255, 128));

        let translucent: Color = "#0000ff80".parse().unwrap();
        assert_eq!(translucent.rgba_bytes(), [0, 0, 255, 128]);
    }

    #[test]
    fn test_parse_named_colors_case_insensitive() {
        assert_eq!("White".parse::<Color>().unwrap(), Color::rgb(255, 255, 255));
        assert!("transparent".parse::<Color>().unwrap().is_transparent());
    }

    #[test]
    fn test_parse_errors() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("#zzz".parse::<Color>().is_err());
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    #[test]
    fn test_non_ascii_hex_is_an_error() {
        assert!("#é12".parse::<Color>().is_err());
        assert!("#ffé".parse::<Color>().is_err());
        assert!("#12345é".parse::<Color>().is_err());
        let err = serde_json::from_str::<Color>("\"#ü0\"").unwrap_err();
        assert!(err.to_string().contains("Invalid hex digits"));
    }

    #[test]
    fn test_deserialize_string_or_map() {
        let c: Color = serde_json::from_str("\"#102030\"").unwrap();
        assert_eq!(c, Color::rgb(16, 32, 48));

        let c: Color = serde_json::from_str(r#"{"r": 1, "g": 2, "b": 3, "a": 0.5}"#).unwrap();
        assert_eq!(c.rgba_bytes(), [1, 2, 3, 128]);
    }
}
