use crate::text::{TextBackend, TextBounds};
use crate::LayoutError;
use cardwright_render_core::Canvas;
use cardwright_style::TextStyle;
use cardwright_types::{Point, Rect};
use std::sync::Mutex;

/// Monospaced metrics without any font files.
///
/// Every character advances `0.5em`. Non-space characters have ink from the
/// baseline up to `0.7em`; `g j p q y` also descend `0.2em`. Drawing fills
/// each glyph's ink box with the text fill.
#[derive(Debug, Default)]
pub struct FakeTextBackend;

impl FakeTextBackend {
    fn glyph_boxes(text: &str, size: f32) -> impl Iterator<Item = (f32, f32, f32)> + '_ {
        text.chars().enumerate().filter_map(move |(i, c)| {
            if c.is_whitespace() {
                return None;
            }
            let descent = if "gjpqy".contains(c) { 0.2 * size } else { 0.0 };
            Some((i as f32 * 0.5 * size, -0.7 * size, descent))
        })
    }
}

impl TextBackend for FakeTextBackend {
    fn bounds(&self, text: &str, style: &TextStyle) -> Result<TextBounds, LayoutError> {
        let size = style.font_size;
        let advance = text.chars().count() as f32 * 0.5 * size;
        let mut bounds: Option<TextBounds> = None;
        for (x, top, bottom) in Self::glyph_boxes(text, size) {
            let b = bounds.get_or_insert(TextBounds {
                left: 0.0,
                top,
                right: advance,
                bottom,
                advance,
            });
            b.left = b.left.min(x);
            b.top = b.top.min(top);
            b.bottom = b.bottom.max(bottom);
        }
        Ok(bounds.unwrap_or_else(|| TextBounds::blank(advance)))
    }

    fn draw_text(
        &self,
        canvas: &mut Canvas,
        text: &str,
        style: &TextStyle,
        baseline_origin: Point,
    ) -> Result<(), LayoutError> {
        let size = style.font_size;
        for (x, top, bottom) in Self::glyph_boxes(text, size) {
            let rect = Rect::new(
                baseline_origin.x + x,
                baseline_origin.y + top,
                0.5 * size,
                bottom - top,
            );
            canvas.fill_rect(&rect, &style.fill);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "FakeTextBackend"
    }
}

/// A [`FakeTextBackend`] that remembers every `draw_text` call.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    inner: FakeTextBackend,
    calls: Mutex<Vec<(String, Point)>>,
}

impl RecordingBackend {
    pub fn calls(&self) -> Vec<(String, Point)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TextBackend for RecordingBackend {
    fn bounds(&self, text: &str, style: &TextStyle) -> Result<TextBounds, LayoutError> {
        self.inner.bounds(text, style)
    }

    fn draw_text(
        &self,
        canvas: &mut Canvas,
        text: &str,
        style: &TextStyle,
        baseline_origin: Point,
    ) -> Result<(), LayoutError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), baseline_origin));
        self.inner.draw_text(canvas, text, style, baseline_origin)
    }

    fn name(&self) -> &'static str {
        "RecordingBackend"
    }
}

/// A solid `width`x`height` PNG.
pub fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
