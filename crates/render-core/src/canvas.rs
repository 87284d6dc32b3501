use crate::error::RenderError;
use crate::utils::{blend_over, pixel_span};
use cardwright_types::{Color, Rect};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Subsamples per axis used for ellipse edge coverage.
const ELLIPSE_SAMPLES: usize = 4;

/// Upper bound on either canvas side.
const MAX_SIDE: u32 = 16_384;

/// The RGBA surface a card is drawn onto.
///
/// Coordinates are pixels with the origin at the top-left corner. Every
/// drawing call blends source-over and silently clips to the canvas.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: &Color) -> Self {
        let image = RgbaImage::from_pixel(width, height, Rgba(background.rgba_bytes()));
        Self { image }
    }

    /// Like [`Canvas::new`], rejecting empty or oversized surfaces.
    pub fn try_new(width: u32, height: u32, background: &Color) -> Result<Self, RenderError> {
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            log::debug!(
                "Rejecting {}x{} canvas, sides must be between 1 and {}",
                width,
                height,
                MAX_SIDE
            );
            return Err(RenderError::CanvasTooLarge { width, height });
        }
        Ok(Self::new(width, height, background))
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 {
            return None;
        }
        self.image.get_pixel_checked(x as u32, y as u32).map(|p| p.0)
    }

    pub fn blend_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4], coverage: f32) {
        if x < 0 || y < 0 || coverage <= 0.0 {
            return;
        }
        if let Some(pixel) = self.image.get_pixel_mut_checked(x as u32, y as u32) {
            pixel.0 = blend_over(pixel.0, rgba, coverage);
        }
    }

    /// Fills every pixel whose centre lies inside `rect`.
    pub fn fill_rect(&mut self, rect: &Rect, color: &Color) {
        if color.is_transparent() {
            return;
        }
        let Some(clipped) = rect.intersect(&self.bounds()) else {
            return;
        };
        let rgba = color.rgba_bytes();
        let (x0, x1) = pixel_span(clipped.x, clipped.right());
        let (y0, y1) = pixel_span(clipped.y, clipped.bottom());
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, rgba, 1.0);
            }
        }
    }

    /// Draws an outline of `width` pixels just inside `rect`.
    pub fn stroke_rect(&mut self, rect: &Rect, color: &Color, width: f32) {
        if width <= 0.0 || rect.is_empty() {
            return;
        }
        let w = width.min(rect.width / 2.0).min(rect.height / 2.0);
        let inner_height = rect.height - 2.0 * w;
        let sides = [
            Rect::new(rect.x, rect.y, rect.width, w),
            Rect::new(rect.x, rect.bottom() - w, rect.width, w),
            Rect::new(rect.x, rect.y + w, w, inner_height),
            Rect::new(rect.right() - w, rect.y + w, w, inner_height),
        ];
        for side in sides.iter().filter(|s| !s.is_empty()) {
            self.fill_rect(side, color);
        }
    }

    /// Fills the ellipse inscribed in `rect`, with anti-aliased edges.
    pub fn fill_ellipse(&mut self, rect: &Rect, color: &Color) {
        self.ellipse_ring(rect, color, None);
    }

    /// Draws the outline of the ellipse inscribed in `rect`, `width` pixels thick.
    pub fn stroke_ellipse(&mut self, rect: &Rect, color: &Color, width: f32) {
        if width <= 0.0 {
            return;
        }
        self.ellipse_ring(rect, color, Some(width));
    }

    fn ellipse_ring(&mut self, rect: &Rect, color: &Color, stroke: Option<f32>) {
        if rect.is_empty() || color.is_transparent() {
            return;
        }
        let Some(clipped) = rect.intersect(&self.bounds()) else {
            return;
        };

        let center = rect.center();
        let (rx, ry) = (rect.width / 2.0, rect.height / 2.0);
        let inner = stroke.map(|w| ((rx - w).max(0.0), (ry - w).max(0.0)));
        let inside = |px: f32, py: f32, rx: f32, ry: f32| -> bool {
            if rx <= 0.0 || ry <= 0.0 {
                return false;
            }
            let dx = (px - center.x) / rx;
            let dy = (py - center.y) / ry;
            dx * dx + dy * dy <= 1.0
        };

        let rgba = color.rgba_bytes();
        let step = 1.0 / ELLIPSE_SAMPLES as f32;
        let total = (ELLIPSE_SAMPLES * ELLIPSE_SAMPLES) as f32;
        let x0 = clipped.x.floor() as i32;
        let x1 = clipped.right().ceil() as i32;
        let y0 = clipped.y.floor() as i32;
        let y1 = clipped.bottom().ceil() as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                let mut hits = 0usize;
                for sy in 0..ELLIPSE_SAMPLES {
                    for sx in 0..ELLIPSE_SAMPLES {
                        let px = x as f32 + (sx as f32 + 0.5) * step;
                        let py = y as f32 + (sy as f32 + 0.5) * step;
                        let in_outer = inside(px, py, rx, ry);
                        let in_inner = inner.is_some_and(|(irx, iry)| inside(px, py, irx, iry));
                        if in_outer && !in_inner {
                            hits += 1;
                        }
                    }
                }
                if hits > 0 {
                    self.blend_pixel(x, y, rgba, hits as f32 / total);
                }
            }
        }
    }

    /// Blends a coverage mask (one byte per pixel, row-major) tinted with `color`.
    ///
    /// This is how rasterized glyphs reach the canvas.
    pub fn draw_mask(
        &mut self,
        x: i32,
        y: i32,
        width: usize,
        height: usize,
        coverage: &[u8],
        color: &Color,
    ) -> Result<(), RenderError> {
        if coverage.len() < width * height {
            return Err(RenderError::MaskSize {
                width,
                height,
                len: coverage.len(),
            });
        }
        let rgba = color.rgba_bytes();
        for row in 0..height {
            let py = y + row as i32;
            if py < 0 || py >= self.height() as i32 {
                continue;
            }
            for col in 0..width {
                let value = coverage[row * width + col];
                if value > 0 {
                    self.blend_pixel(x + col as i32, py, rgba, value as f32 / 255.0);
                }
            }
        }
        Ok(())
    }

    /// Blends `source` with its top-left corner at `(x, y)`.
    pub fn draw_image(&mut self, source: &RgbaImage, x: i32, y: i32) {
        let col_start = x.saturating_neg().max(0) as u32;
        let row_start = y.saturating_neg().max(0) as u32;
        let col_end = source.width().min((self.width() as i32).saturating_sub(x).max(0) as u32);
        let row_end = source.height().min((self.height() as i32).saturating_sub(y).max(0) as u32);

        for row in row_start..row_end {
            for col in col_start..col_end {
                let src = source.get_pixel(col, row).0;
                self.blend_pixel(x + col as i32, y + row as i32, src, 1.0);
            }
        }
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        self.image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        self.image
            .save_with_format(path.as_ref(), ImageFormat::Png)
            .map_err(RenderError::from)
    }
}
