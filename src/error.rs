use cardwright_executor::ExecutorError;
use cardwright_layout::LayoutError;
use cardwright_render_core::RenderError;
use cardwright_source::SourceError;
use cardwright_traits::ResourceError;
use thiserror::Error;

/// Everything that can go wrong between reading a schema and writing a card.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Reading entries failed: {0}")]
    Source(#[from] SourceError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Executor error: {0}")]
    Executor(#[from] ExecutorError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Card {index} failed: {message}")]
    Card { index: usize, message: String },

    #[error("Pipeline is misconfigured: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::Layout(LayoutError::SchemaParse(e))
    }
}
