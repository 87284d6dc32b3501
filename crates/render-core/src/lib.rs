//! Core rendering abstractions for raster cards.
//!
//! This crate provides the drawing surface and output seam used by the layout engine:
//! - `Canvas`, an RGBA raster with source-over blending primitives
//! - `CardSink` trait for consuming rendered cards
//! - Error types for rendering operations

mod canvas;
mod error;
mod traits;
mod types;
pub mod utils;

pub use canvas::Canvas;
pub use error::RenderError;
pub use traits::CardSink;
pub use types::RenderedCard;

pub use image::RgbaImage;
