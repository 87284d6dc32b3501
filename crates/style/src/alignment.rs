//! Anchor alignments used to resolve relative placement into pixel positions.

use cardwright_types::{Point, Rect};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum XAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum YAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// One of the nine anchor points of a rectangle.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Middle,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl XAlignment {
    fn factor(self) -> f32 {
        match self {
            XAlignment::Left => 0.0,
            XAlignment::Center => 0.5,
            XAlignment::Right => 1.0,
        }
    }

    /// Horizontal offset of an item of `item_width` inside `width`.
    pub fn offset(self, width: f32, item_width: f32) -> f32 {
        (width - item_width) * self.factor()
    }
}

impl YAlignment {
    fn factor(self) -> f32 {
        match self {
            YAlignment::Top => 0.0,
            YAlignment::Middle => 0.5,
            YAlignment::Bottom => 1.0,
        }
    }

    /// Vertical offset of an item of `item_height` inside a line of `line_height`.
    pub fn offset(self, line_height: f32, item_height: f32) -> f32 {
        (line_height - item_height) * self.factor()
    }
}

impl Alignment {
    pub fn split(self) -> (XAlignment, YAlignment) {
        use Alignment::*;
        match self {
            TopLeft => (XAlignment::Left, YAlignment::Top),
            TopCenter => (XAlignment::Center, YAlignment::Top),
            TopRight => (XAlignment::Right, YAlignment::Top),
            MiddleLeft => (XAlignment::Left, YAlignment::Middle),
            Middle => (XAlignment::Center, YAlignment::Middle),
            MiddleRight => (XAlignment::Right, YAlignment::Middle),
            BottomLeft => (XAlignment::Left, YAlignment::Bottom),
            BottomCenter => (XAlignment::Center, YAlignment::Bottom),
            BottomRight => (XAlignment::Right, YAlignment::Bottom),
        }
    }

    pub fn compose(x: XAlignment, y: YAlignment) -> Self {
        use Alignment::*;
        match (y, x) {
            (YAlignment::Top, XAlignment::Left) => TopLeft,
            (YAlignment::Top, XAlignment::Center) => TopCenter,
            (YAlignment::Top, XAlignment::Right) => TopRight,
            (YAlignment::Middle, XAlignment::Left) => MiddleLeft,
            (YAlignment::Middle, XAlignment::Center) => Middle,
            (YAlignment::Middle, XAlignment::Right) => MiddleRight,
            (YAlignment::Bottom, XAlignment::Left) => BottomLeft,
            (YAlignment::Bottom, XAlignment::Center) => BottomCenter,
            (YAlignment::Bottom, XAlignment::Right) => BottomRight,
        }
    }

    /// The anchor point of `rect` for this alignment.
    pub fn root(self, rect: Rect) -> Point {
        let (x, y) = self.split();
        Point::new(
            rect.x + rect.width * x.factor(),
            rect.y + rect.height * y.factor(),
        )
    }

    /// Places a box of `size` so that its anchor coincides with the anchor of `area`.
    ///
    /// A zero-sized `area` degenerates to "anchor the box at this point".
    pub fn place(self, size: Point, area: Rect) -> Rect {
        let anchor = self.root(area);
        let own_anchor = self.root(Point::zero().to(size));
        let origin = anchor - own_anchor;
        origin.to(origin + size)
    }
}

fn normalise(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Alignment::*;
        match normalise(s).as_str() {
            "top_left" => Ok(TopLeft),
            "top" | "top_center" | "top_middle" => Ok(TopCenter),
            "top_right" => Ok(TopRight),
            "left" | "middle_left" | "center_left" => Ok(MiddleLeft),
            "middle" | "center" | "centre" | "middle_center" => Ok(Middle),
            "right" | "middle_right" | "center_right" => Ok(MiddleRight),
            "bottom_left" => Ok(BottomLeft),
            "bottom" | "bottom_center" | "bottom_middle" => Ok(BottomCenter),
            "bottom_right" => Ok(BottomRight),
            _ => Err(format!("Invalid alignment: '{}'", s)),
        }
    }
}

impl FromStr for XAlignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "left" => Ok(XAlignment::Left),
            "center" | "centre" | "middle" => Ok(XAlignment::Center),
            "right" => Ok(XAlignment::Right),
            _ => Err(format!("Invalid horizontal alignment: '{}'", s)),
        }
    }
}

impl FromStr for YAlignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "top" => Ok(YAlignment::Top),
            "middle" | "center" | "centre" => Ok(YAlignment::Middle),
            "bottom" => Ok(YAlignment::Bottom),
            _ => Err(format!("Invalid vertical alignment: '{}'", s)),
        }
    }
}

macro_rules! deserialize_from_str {
    ($ty:ty) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

deserialize_from_str!(Alignment);
deserialize_from_str!(XAlignment);
deserialize_from_str!(YAlignment);
