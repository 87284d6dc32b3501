//! Declarative card layout engine.
//!
//! A JSON [`Schema`] describes a tree of card elements (containers, text
//! lines, images, shapes) positioned with relative or pixel offsets and anchor
//! alignments. Every data [`Entry`] is drawn through that tree onto an RGBA
//! canvas and handed to a [`CardSink`] as a PNG-ready [`RenderedCard`].
//!
//! The workspace is split the same way the work is:
//!
//! - `cardwright-types` / `cardwright-style`: geometry, colors, entries, alignment and text styles
//! - `cardwright-layout`: fonts, text measurement, the element tree and schemas
//! - `cardwright-render-core`: the canvas and the sink seam
//! - `cardwright-source`, `cardwright-resource`, `cardwright-executor`: platform plumbing
//!
//! This crate ties them together in [`PipelineBuilder`] and [`CardPipeline`].

pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{
    CardFailure, CardPipeline, DirectorySink, GenerationReport, MemorySink, PipelineBuilder,
    PipelineConfig,
};

pub use cardwright_executor::{Executor, ExecutorImpl, SyncExecutor};
#[cfg(feature = "rayon-executor")]
pub use cardwright_executor::RayonExecutor;
pub use cardwright_layout::{
    CardLayout, FieldTemplates, FontRasterizer, LayoutConfig, LayoutError, RenderEnvironment,
    Schema, SharedFontLibrary, TextBackend, TextBounds,
};
pub use cardwright_render_core::{Canvas, CardSink, RenderError, RenderedCard};
pub use cardwright_resource::{FilesystemResourceProvider, InMemoryResourceProvider};
pub use cardwright_source::{
    EntrySource, JsonArraySource, JsonLinesSource, SourceError, VecEntrySource,
};
pub use cardwright_style::{Alignment, Tag, TextStyle};
pub use cardwright_traits::{FontProvider, InMemoryFontProvider, ResourceProvider};
pub use cardwright_types::{Color, Entry, Point, Rect};
