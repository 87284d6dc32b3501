//! Relative and pixel lengths, and the scaling that resolves them against a parent.
use crate::parsers::{parse_dimension, run_parser};
use cardwright_types::Point;
use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    /// Absolute pixels.
    Px(f32),
    /// Fraction of the parent length.
    Relative(f32),
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Px(0.0)
    }
}

impl Dimension {
    /// Interprets a bare number: magnitudes up to 1 are fractions of the
    /// parent, anything larger is a pixel count.
    pub fn from_number(value: f32) -> Self {
        if value.abs() <= 1.0 {
            Dimension::Relative(value)
        } else {
            Dimension::Px(value)
        }
    }

    pub fn resolve(self, parent_length: f32) -> f32 {
        match self {
            Dimension::Px(v) => v,
            Dimension::Relative(f) => f * parent_length,
        }
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DimensionDef {
            Num(f32),
            Str(String),
        }

        match DimensionDef::deserialize(deserializer)? {
            DimensionDef::Num(n) => Ok(Dimension::from_number(n)),
            DimensionDef::Str(s) => run_parser(parse_dimension, &s).map_err(de::Error::custom),
        }
    }
}

/// A pair of dimensions resolved against a parent size.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: Dimension,
    pub y: Dimension,
}

/// Sizes scale exactly like offsets.
pub type Extent = Offset;

impl Offset {
    pub fn new(x: Dimension, y: Dimension) -> Self {
        Self { x, y }
    }

    pub fn px(x: f32, y: f32) -> Self {
        Self::new(Dimension::Px(x), Dimension::Px(y))
    }

    pub fn relative(x: f32, y: f32) -> Self {
        Self::new(Dimension::Relative(x), Dimension::Relative(y))
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Resolves both components against `parent_size` (width, height).
    pub fn scale(&self, parent_size: Point) -> Point {
        Point::new(self.x.resolve(parent_size.x), self.y.resolve(parent_size.y))
    }
}

impl<'de> Deserialize<'de> for Offset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OffsetDef {
            Pair([Dimension; 2]),
            Map { x: Dimension, y: Dimension },
            Uniform(Dimension),
        }

        Ok(match OffsetDef::deserialize(deserializer)? {
            OffsetDef::Pair([x, y]) => Offset { x, y },
            OffsetDef::Map { x, y } => Offset { x, y },
            OffsetDef::Uniform(d) => Offset { x: d, y: d },
        })
    }
}
