//! Inline markup directives attached to text runs.
//!
//! Tags arrive pre-parsed: a schema lists them next to the text they style,
//! either as `"name=data"` strings or as `{ "name": .., "data": .. }` maps.

use crate::parsers::{parse_tag, run_parser, StyleParseError};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tag_data::TagData;

/// What a tag does to the style of the run it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Font,
    Size,
    Fill,
    Bold,
    Italic,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>, data: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            data: data.map(Into::into),
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: None,
        }
    }

    pub fn with_data(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Some(data.into()),
        }
    }

    pub fn kind(&self) -> TagKind {
        match self.name.to_ascii_lowercase().as_str() {
            "font" => TagKind::Font,
            "size" => TagKind::Size,
            "color" | "fill" => TagKind::Fill,
            "b" | "bold" => TagKind::Bold,
            "i" | "italic" => TagKind::Italic,
            _ => TagKind::Other,
        }
    }

    /// The data a tag of this kind needs, or an error naming the tag.
    pub fn required_data(&self) -> Result<&str, StyleParseError> {
        self.data.as_deref().ok_or_else(|| StyleParseError::InvalidValue {
            property: self.name.clone(),
            value: "<missing>".to_string(),
        })
    }

    pub fn opening_repr(&self) -> String {
        match &self.data {
            Some(data) => format!("<{}={}>", self.name, data),
            None => format!("<{}>", self.name),
        }
    }

    pub fn closing_repr(&self) -> String {
        format!("</{}>", self.name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.opening_repr())
    }
}

impl FromStr for Tag {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        run_parser(parse_tag, s)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum TagDef {
            Str(String),
            Map {
                name: String,
                #[serde(default)]
                data: Option<TagData>,
            },
        }

        match TagDef::deserialize(deserializer)? {
            TagDef::Str(s) => s.parse().map_err(de::Error::custom),
            TagDef::Map { name, data } => Ok(Tag {
                name,
                data: data.map(TagData::into_string),
            }),
        }
    }
}

/// Tag data may be written as a JSON number (`"size": 24`) as well as a string.
mod tag_data {
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub enum TagData {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    impl TagData {
        pub fn into_string(self) -> String {
            match self {
                TagData::Str(s) => s,
                TagData::Int(i) => i.to_string(),
                TagData::Float(f) => f.to_string(),
                TagData::Bool(b) => b.to_string(),
            }
        }
    }
}
