use crate::font::{FontStyle, FontWeight};
use crate::parsers::{parse_font_size, StyleParseError};
use crate::tag::{Tag, TagKind};
use cardwright_types::Color;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn default_font() -> String {
    "sans-serif".to_string()
}

fn default_font_size() -> f32 {
    16.0
}

/// The resolved style of one run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// A font alias registered by the schema, or a family name.
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub fill: Color,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub style: FontStyle,
}

impl Eq for TextStyle {}

impl Hash for TextStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.font.hash(state);
        self.font_size.to_bits().hash(state);
        self.fill.hash(state);
        self.weight.hash(state);
        self.style.hash(state);
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: default_font(),
            font_size: default_font_size(),
            fill: Color::default(),
            weight: FontWeight::default(),
            style: FontStyle::default(),
        }
    }
}

impl TextStyle {
    pub fn new(font: impl Into<String>, font_size: f32, fill: Color) -> Self {
        Self {
            font: font.into(),
            font_size,
            fill,
            ..Default::default()
        }
    }

    /// A hash identifying this style in measurement caches.
    pub fn cache_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Returns this style with `tags` applied in order; later tags win.
    ///
    /// Unknown tags are left to other consumers and do not change the style.
    pub fn apply_tags(&self, tags: &[Tag]) -> Result<TextStyle, StyleParseError> {
        let mut style = self.clone();
        for tag in tags {
            match tag.kind() {
                TagKind::Font => style.font = tag.required_data()?.to_string(),
                TagKind::Size => style.font_size = parse_font_size(tag.required_data()?)?,
                TagKind::Fill => {
                    let data = tag.required_data()?;
                    style.fill = data.parse().map_err(StyleParseError::Color)?;
                }
                TagKind::Bold => style.weight = FontWeight::Bold,
                TagKind::Italic => style.style = FontStyle::Italic,
                TagKind::Other => {
                    log::debug!("Tag '{}' does not affect text style", tag.name);
                }
            }
        }
        Ok(style)
    }
}
