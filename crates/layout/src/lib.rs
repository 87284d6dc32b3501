use cardwright_render_core::RenderError;
use cardwright_style::StyleParseError;
use cardwright_traits::{FontError, ResourceError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Font error: {0}")]
    Font(#[from] FontError),
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
    #[error("Style error: {0}")]
    Style(#[from] StyleParseError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Template '{template}' failed: {message}")]
    Template { template: String, message: String },
    #[error("Failed to decode image '{src}': {message}")]
    ImageDecode { src: String, message: String },
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
    #[error("Failed to parse schema: {0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("Repeat count '{value}' from '{field}' is not a number between 0 and {limit}")]
    InvalidRepeatCount {
        field: String,
        value: String,
        limit: usize,
    },
    #[error("Shaping failed: {0}")]
    Shaping(String),
}

pub mod builder;
pub mod cache;
pub mod card;
pub mod config;
pub mod elements;
pub mod environment;
pub mod fonts;
pub mod image_cache;
pub mod schema;
pub mod template;
pub mod text;

pub use self::builder::TreeBuilder;
pub use self::card::CardLayout;
pub use self::config::LayoutConfig;
pub use self::elements::{CardElement, CardNode, DrawContext, Frame};
pub use self::environment::RenderEnvironment;
pub use self::fonts::{FontData, FontInstance, SharedFontLibrary};
pub use self::schema::{ElementDef, FontSource, Schema};
pub use self::template::FieldTemplates;
pub use self::text::{FontRasterizer, TextBackend, TextBounds};

#[cfg(test)]
mod test_utils;
