pub mod alignment;
pub mod dimension;
pub mod font;
pub mod parsers;
pub mod tag;
pub mod text;

pub use alignment::{Alignment, XAlignment, YAlignment};
pub use dimension::{Dimension, Extent, Offset};
pub use font::{FontStyle, FontWeight};
pub use parsers::StyleParseError;
pub use tag::{Tag, TagKind};
pub use text::TextStyle;
