//! The declarative card description loaded from JSON.
//!
//! A schema fixes the card size, the default text style, optional font files
//! and the element tree. Element definitions are tagged by `"type"` and carry
//! their frame fields inline:
//!
//! ```json
//! {
//!   "width": 750, "height": 1050,
//!   "text": { "font": "body", "font_size": 28 },
//!   "fonts": [{ "alias": "body", "path": "fonts/Body.ttf" }],
//!   "root": {
//!     "type": "container",
//!     "size": [1, 1],
//!     "children": [
//!       { "type": "text", "offset": [0.05, 0.04], "size": [0.9, 0.08],
//!         "content": "{{name}}", "tags": ["b"] }
//!     ]
//!   }
//! }
//! ```

use crate::elements::{Frame, ImageFit, Repeat, SegmentDef, ShapeKind, TextOverrides};
use crate::fonts::SharedFontLibrary;
use crate::LayoutError;
use cardwright_style::{Alignment, FontStyle, FontWeight, Tag, TextStyle, YAlignment};
use cardwright_traits::ResourceProvider;
use cardwright_types::{Color, Rect};
use serde::Deserialize;

/// Default text style for every text element of the card.
pub type TextDefaults = TextStyle;

fn default_background() -> Color {
    Color::rgb(255, 255, 255)
}

fn default_output() -> String {
    "{{index}}.png".to_string()
}

fn default_line_alignment() -> YAlignment {
    YAlignment::Bottom
}

fn default_outline_width() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default)]
    pub text: TextDefaults,
    #[serde(default)]
    pub fonts: Vec<FontSource>,
    /// File name template for rendered cards.
    #[serde(default = "default_output")]
    pub output: String,
    pub root: ElementDef,
}

impl Schema {
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        let schema: Schema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, LayoutError> {
        let schema: Schema = serde_json::from_value(value)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::InvalidSchema(format!(
                "card size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.text.font_size.is_finite() && self.text.font_size > 0.0) {
            return Err(LayoutError::InvalidSchema(format!(
                "default font size must be positive, got {}",
                self.text.font_size
            )));
        }
        if self.output.trim().is_empty() {
            return Err(LayoutError::InvalidSchema(
                "output file name template is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The rectangle the root element resolves against.
    pub fn card_area(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Loads every declared font through `resources` and registers it as an alias.
    pub fn register_fonts(
        &self,
        library: &SharedFontLibrary,
        resources: &dyn ResourceProvider,
    ) -> Result<usize, LayoutError> {
        for source in &self.fonts {
            source.register(library, resources)?;
        }
        Ok(self.fonts.len())
    }
}

/// A font file bundled with the schema, addressed in text styles by `alias`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontSource {
    pub alias: String,
    /// Resource path relative to the schema.
    pub path: String,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub style: FontStyle,
}

impl FontSource {
    pub fn register(
        &self,
        library: &SharedFontLibrary,
        resources: &dyn ResourceProvider,
    ) -> Result<(), LayoutError> {
        let data = resources.load(&self.path)?;
        library.register_alias(&self.alias, self.weight, self.style, data)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementDef {
    Container(ContainerDef),
    Text(TextDef),
    Image(ImageDef),
    Shape(ShapeDef),
}

impl ElementDef {
    pub fn frame(&self) -> &Frame {
        match self {
            ElementDef::Container(d) => &d.frame,
            ElementDef::Text(d) => &d.frame,
            ElementDef::Image(d) => &d.frame,
            ElementDef::Shape(d) => &d.frame,
        }
    }

    pub fn children(&self) -> &[ElementDef] {
        match self {
            ElementDef::Container(d) => &d.children,
            ElementDef::Text(d) => &d.children,
            ElementDef::Image(d) => &d.children,
            ElementDef::Shape(d) => &d.children,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerDef {
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(default)]
    pub repeat: Option<Repeat>,
    #[serde(default)]
    pub children: Vec<ElementDef>,
}

/// A text line, written either as `segments` or as the `content`/`tags`
/// shorthand for a single segment.
#[derive(Debug, Clone, Deserialize)]
pub struct TextDef {
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(default)]
    pub segments: Vec<SegmentDef>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub overrides: TextOverrides,
    #[serde(default)]
    pub text_alignment: Option<Alignment>,
    #[serde(default = "default_line_alignment")]
    pub line_alignment: YAlignment,
    #[serde(default)]
    pub spacing: f32,
    #[serde(default)]
    pub children: Vec<ElementDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageDef {
    #[serde(flatten)]
    pub frame: Frame,
    pub src: String,
    #[serde(default)]
    pub fit: ImageFit,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub children: Vec<ElementDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShapeDef {
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(default)]
    pub shape: ShapeKind,
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub outline: Option<Color>,
    #[serde(default = "default_outline_width")]
    pub outline_width: f32,
    #[serde(default)]
    pub children: Vec<ElementDef>,
}
