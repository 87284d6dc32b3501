use crate::error::RenderError;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// One finished card, ready for a sink.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    /// Position of the entry in its source.
    pub index: usize,
    /// Output file name rendered from the schema's `output` template.
    pub file_name: String,
    pub image: RgbaImage,
}

impl RenderedCard {
    pub fn new(index: usize, file_name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            index,
            file_name: file_name.into(),
            image,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The card encoded as a PNG file.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        self.image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}
