pub mod color;
pub mod entry;
pub mod geometry;

pub use color::Color;
pub use entry::{Entry, EntryError};
pub use geometry::{Point, Rect};
