//! Text measurement and drawing.
//!
//! The layout side only ever talks to a [`TextBackend`]; [`FontRasterizer`]
//! is the production implementation built on rustybuzz and fontdue.

pub mod backend;
pub mod line;
pub mod raster;
pub mod segment;
pub mod shaper;

pub use backend::{TextBackend, TextBounds};
pub use line::TextLine;
pub use raster::FontRasterizer;
pub use segment::{LineSegment, SpaceSegment, TextSegment, REFERENCE_TEXT};
