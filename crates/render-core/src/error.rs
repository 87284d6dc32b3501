use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Canvas of {width}x{height} pixels is too large")]
    CanvasTooLarge { width: u32, height: u32 },
    #[error("Glyph mask of {len} bytes does not cover {width}x{height} pixels")]
    MaskSize { width: usize, height: usize, len: usize },
    #[error("Output error for '{name}': {message}")]
    Output { name: String, message: String },
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}
