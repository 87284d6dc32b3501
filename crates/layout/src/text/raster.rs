use crate::cache::BoundedCache;
use crate::config::LayoutConfig;
use crate::fonts::SharedFontLibrary;
use crate::text::backend::{TextBackend, TextBounds};
use crate::text::shaper::{shape_text, ShapedRun};
use crate::LayoutError;
use cardwright_render_core::Canvas;
use cardwright_style::TextStyle;
use cardwright_types::Point;

/// Text backend that shapes with rustybuzz and paints fontdue coverage masks.
pub struct FontRasterizer {
    library: SharedFontLibrary,
    measurements: BoundedCache<(String, u64), TextBounds>,
}

impl std::fmt::Debug for FontRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRasterizer")
            .field("library", &self.library)
            .field("cached_measurements", &self.measurements.len())
            .finish()
    }
}

impl FontRasterizer {
    pub fn new(library: SharedFontLibrary, config: &LayoutConfig) -> Self {
        Self {
            library,
            measurements: BoundedCache::new(config.cache_capacity),
        }
    }

    pub fn library(&self) -> &SharedFontLibrary {
        &self.library
    }

    pub fn shape(&self, text: &str, style: &TextStyle) -> Result<ShapedRun, LayoutError> {
        let font = self.library.resolve_style(style)?;
        shape_text(&font, text, style.font_size)
    }
}

impl TextBackend for FontRasterizer {
    fn bounds(&self, text: &str, style: &TextStyle) -> Result<TextBounds, LayoutError> {
        self.measurements
            .get_or_try_insert((text.to_string(), style.cache_key()), || -> Result<_, LayoutError> {
                Ok(self.shape(text, style)?.bounds)
            })
    }

    fn draw_text(
        &self,
        canvas: &mut Canvas,
        text: &str,
        style: &TextStyle,
        baseline_origin: Point,
    ) -> Result<(), LayoutError> {
        if text.trim().is_empty() || style.fill.is_transparent() {
            return Ok(());
        }
        let font = self.library.resolve_style(style)?;
        let run = shape_text(&font, text, style.font_size)?;
        let raster = font.raster_font()?;

        for glyph in &run.glyphs {
            let (metrics, coverage) = raster.rasterize_indexed(glyph.glyph_id, style.font_size);
            if metrics.width == 0 || metrics.height == 0 {
                continue;
            }
            // fontdue reports the bitmap's bottom edge relative to the baseline, y up.
            let x = baseline_origin.x + glyph.x + metrics.xmin as f32;
            let y = baseline_origin.y + glyph.y - (metrics.ymin + metrics.height as i32) as f32;
            canvas.draw_mask(
                x.round() as i32,
                y.round() as i32,
                metrics.width,
                metrics.height,
                &coverage,
                &style.fill,
            )?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "FontRasterizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_is_reported() {
        let rasterizer = FontRasterizer::new(SharedFontLibrary::new(), &LayoutConfig::default());
        let style = TextStyle::new("Missing", 12.0, Default::default());
        assert!(matches!(
            rasterizer.bounds("Goblin", &style),
            Err(LayoutError::Font(_))
        ));
    }

    #[test]
    fn test_blank_text_draws_nothing() {
        let rasterizer = FontRasterizer::new(SharedFontLibrary::new(), &LayoutConfig::default());
        let mut canvas = Canvas::new(4, 4, &Default::default());
        let style = TextStyle::new("Missing", 12.0, Default::default());
        // No font lookup happens for blank runs.
        rasterizer
            .draw_text(&mut canvas, "  ", &style, Point::zero())
            .unwrap();
    }
}
