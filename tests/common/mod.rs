#![allow(dead_code)]

pub mod card_assertions;
pub mod fixtures;

use cardwright::{
    Canvas, CardPipeline, Entry, ExecutorImpl, InMemoryResourceProvider, LayoutError,
    PipelineBuilder, PipelineConfig, PipelineError, Point, Rect, RenderedCard, TextBackend,
    TextBounds, TextStyle,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Deterministic text metrics so tests never depend on installed fonts.
///
/// Each character advances `0.6em`; visible characters have ink from the
/// baseline up to `0.8em`. Drawing fills each ink box with the text color.
#[derive(Debug, Default)]
pub struct BlockTextBackend {
    drawn: Mutex<Vec<(String, Point, TextStyle)>>,
}

impl BlockTextBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every `draw_text` call so far: text, baseline origin and style.
    pub fn drawn(&self) -> Vec<(String, Point, TextStyle)> {
        self.drawn.lock().unwrap().clone()
    }

    pub fn drawn_texts(&self) -> Vec<String> {
        self.drawn().into_iter().map(|(t, _, _)| t).collect()
    }
}

impl TextBackend for BlockTextBackend {
    fn bounds(&self, text: &str, style: &TextStyle) -> Result<TextBounds, LayoutError> {
        let advance = text.chars().count() as f32 * 0.6 * style.font_size;
        if text.trim().is_empty() {
            return Ok(TextBounds::blank(advance));
        }
        Ok(TextBounds {
            left: 0.0,
            top: -0.8 * style.font_size,
            right: advance,
            bottom: 0.0,
            advance,
        })
    }

    fn draw_text(
        &self,
        canvas: &mut Canvas,
        text: &str,
        style: &TextStyle,
        baseline_origin: Point,
    ) -> Result<(), LayoutError> {
        self.drawn
            .lock()
            .unwrap()
            .push((text.to_string(), baseline_origin, style.clone()));
        let em = style.font_size;
        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let rect = Rect::new(
                baseline_origin.x + i as f32 * 0.6 * em,
                baseline_origin.y - 0.8 * em,
                0.6 * em,
                0.8 * em,
            );
            canvas.fill_rect(&rect, &style.fill);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "BlockTextBackend"
    }
}

/// A sequential pipeline over `schema` with the block text backend and in-memory resources.
pub fn pipeline_for(
    schema: &Value,
    backend: Arc<BlockTextBackend>,
    resources: InMemoryResourceProvider,
) -> Result<CardPipeline, PipelineError> {
    PipelineBuilder::new()
        .with_schema_source(&schema.to_string())?
        .with_text_backend(backend)
        .with_resource_provider(Arc::new(resources))
        .with_config(PipelineConfig::sequential().with_batch_size(4))
        .with_executor(ExecutorImpl::for_parallelism(false))
        .build()
}

/// Renders a single entry with a fresh pipeline.
pub fn render_one(schema: &Value, entry: Value) -> Result<RenderedCard, PipelineError> {
    let pipeline = pipeline_for(schema, BlockTextBackend::new(), InMemoryResourceProvider::new())?;
    pipeline.render_entry(&entry_from(entry), 0)
}

pub fn entry_from(value: Value) -> Entry {
    Entry::from_json(value).expect("entry fixtures are JSON objects")
}

/// A solid PNG for image tests.
pub fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
