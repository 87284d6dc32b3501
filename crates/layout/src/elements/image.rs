use super::{CardElement, CardNode, DrawContext, Frame};
use crate::LayoutError;
use ::image::imageops::{self, FilterType};
use ::image::RgbaImage;
use cardwright_render_core::Canvas;
use cardwright_style::Alignment;
use cardwright_types::{Point, Rect};
use serde::Deserialize;

/// How artwork is scaled into its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Fill the area exactly, ignoring the aspect ratio.
    #[default]
    Stretch,
    /// Largest size that fits inside the area.
    Contain,
    /// Smallest size that covers the area; the overflow is cropped.
    Cover,
}

/// Destination rectangle for an image of `image_size` pixels in `area`.
///
/// `Contain` and `Cover` keep the aspect ratio and are anchored with `alignment`.
pub fn fit_rect(image_size: (u32, u32), area: Rect, fit: ImageFit, alignment: Alignment) -> Rect {
    let (w, h) = (image_size.0 as f32, image_size.1 as f32);
    if w <= 0.0 || h <= 0.0 {
        return Rect::new(area.x, area.y, 0.0, 0.0);
    }
    let scale = match fit {
        ImageFit::Stretch => return area,
        ImageFit::Contain => (area.width / w).min(area.height / h),
        ImageFit::Cover => (area.width / w).max(area.height / h),
    };
    alignment.place(Point::new(w * scale, h * scale), area)
}

/// Artwork loaded from a resource path.
#[derive(Debug, Clone)]
pub struct ImageElement {
    pub frame: Frame,
    /// Resource path, may contain `{{field}}` placeholders.
    pub src: String,
    pub fit: ImageFit,
    /// Skip the image with a warning instead of failing the card.
    pub optional: bool,
    pub children: Vec<CardNode>,
}

impl ImageElement {
    pub fn new(frame: Frame, src: impl Into<String>) -> Self {
        Self {
            frame,
            src: src.into(),
            fit: ImageFit::default(),
            optional: false,
            children: Vec::new(),
        }
    }

    fn blit(&self, canvas: &mut Canvas, source: &RgbaImage, area: Rect) {
        let (src_w, src_h) = source.dimensions();
        let dest = fit_rect((src_w, src_h), area, self.fit, self.frame.alignment);
        if dest.is_empty() {
            return;
        }
        // Clip in float space so far-off areas never reach integer pixel math.
        let Some(visible) = dest
            .intersect(&area)
            .and_then(|r| r.intersect(&canvas.bounds()))
        else {
            return;
        };
        let (x0, y0) = visible.origin().round();
        let (x1, y1) = Point::new(visible.right(), visible.bottom()).round();
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let (view_w, view_h) = ((x1 - x0) as u32, (y1 - y0) as u32);

        // Source texels behind the visible part, widened to whole texels.
        let kx = dest.width / src_w as f32;
        let ky = dest.height / src_h as f32;
        let sx0 = ((x0 as f32 - dest.x) / kx).floor().clamp(0.0, src_w as f32) as u32;
        let sy0 = ((y0 as f32 - dest.y) / ky).floor().clamp(0.0, src_h as f32) as u32;
        let sx1 = ((x1 as f32 - dest.x) / kx).ceil().clamp(0.0, src_w as f32) as u32;
        let sy1 = ((y1 as f32 - dest.y) / ky).ceil().clamp(0.0, src_h as f32) as u32;
        if sx1 <= sx0 || sy1 <= sy0 {
            return;
        }
        let piece = imageops::crop_imm(source, sx0, sy0, sx1 - sx0, sy1 - sy0).to_image();

        // The piece at its true scale overhangs the view by less than a texel
        // per side. When single texels dwarf the view it is stretched onto the
        // view instead.
        let piece_w = ((sx1 - sx0) as f32 * kx).round().max(1.0);
        let piece_h = ((sy1 - sy0) as f32 * ky).round().max(1.0);
        let fits = piece_w <= view_w as f32 * 4.0 + 2.0 && piece_h <= view_h as f32 * 4.0 + 2.0;
        if !fits {
            let scaled = imageops::resize(&piece, view_w, view_h, FilterType::Triangle);
            canvas.draw_image(&scaled, x0, y0);
            return;
        }

        let (piece_w, piece_h) = (piece_w as u32, piece_h as u32);
        let scaled = if piece.dimensions() == (piece_w, piece_h) {
            piece
        } else {
            imageops::resize(&piece, piece_w, piece_h, FilterType::Triangle)
        };
        let (px, py) = Point::new(dest.x + sx0 as f32 * kx, dest.y + sy0 as f32 * ky).round();
        let cx = x0.saturating_sub(px).clamp(0, piece_w as i32) as u32;
        let cy = y0.saturating_sub(py).clamp(0, piece_h as i32) as u32;
        let cw = view_w.min(piece_w - cx);
        let ch = view_h.min(piece_h - cy);
        if cw == 0 || ch == 0 {
            return;
        }
        let visible = imageops::crop_imm(&scaled, cx, cy, cw, ch).to_image();
        canvas.draw_image(&visible, px.saturating_add(cx as i32), py.saturating_add(cy as i32));
    }
}

impl CardElement for ImageElement {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn children(&self) -> &[CardNode] {
        &self.children
    }

    fn draw_self(&self, ctx: &mut DrawContext<'_>, area: Rect) -> Result<(), LayoutError> {
        if area.is_empty() {
            return Ok(());
        }
        let src = ctx.render_field(&self.src)?;
        let image = match ctx.env.images.load(&src, ctx.env.resources.as_ref()) {
            Ok(image) => image,
            Err(e) if self.optional => {
                log::warn!("Skipping optional image '{}' for entry {}: {}", src, ctx.index, e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        self.blit(ctx.canvas, &image, area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::Rgba;
    use cardwright_types::Color;

    const AREA: Rect = Rect::new(0.0, 0.0, 100.0, 50.0);

    #[test]
    fn test_fit_rect_modes() {
        assert_eq!(fit_rect((10, 10), AREA, ImageFit::Stretch, Alignment::Middle), AREA);
        assert_eq!(
            fit_rect((10, 10), AREA, ImageFit::Contain, Alignment::Middle),
            Rect::new(25.0, 0.0, 50.0, 50.0)
        );
        assert_eq!(
            fit_rect((10, 10), AREA, ImageFit::Contain, Alignment::TopLeft),
            Rect::new(0.0, 0.0, 50.0, 50.0)
        );
        assert_eq!(
            fit_rect((10, 10), AREA, ImageFit::Cover, Alignment::Middle),
            Rect::new(0.0, -25.0, 100.0, 100.0)
        );
        assert_eq!(
            fit_rect((0, 10), AREA, ImageFit::Contain, Alignment::Middle),
            Rect::new(0.0, 0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_cover_is_cropped_to_area() {
        let mut canvas = Canvas::new(20, 20, &Color::rgb(255, 255, 255));
        let mut element = ImageElement::new(Frame::fill(), "art.png");
        element.fit = ImageFit::Cover;
        element.frame.alignment = Alignment::Middle;

        let source = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
        element.blit(&mut canvas, &source, Rect::new(5.0, 5.0, 10.0, 4.0));

        assert_eq!(canvas.pixel(5, 5), Some([0, 0, 255, 255]));
        assert_eq!(canvas.pixel(14, 8), Some([0, 0, 255, 255]));
        assert_eq!(canvas.pixel(5, 4), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(5, 9), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(15, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_cover_maps_visible_part_back_to_source() {
        let mut canvas = Canvas::new(20, 20, &Color::rgb(255, 255, 255));
        let mut element = ImageElement::new(Frame::fill(), "art.png");
        element.fit = ImageFit::Cover;
        element.frame.alignment = Alignment::Middle;

        // A tall strip: red on top, blue below. Covering 20x20 scales it by
        // 10 and shows only the two rows around the seam.
        let source = RgbaImage::from_fn(2, 200, |_, y| {
            if y < 100 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 255, 255]) }
        });
        element.blit(&mut canvas, &source, Rect::new(0.0, 0.0, 20.0, 20.0));

        assert_eq!(canvas.pixel(5, 2), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(15, 17), Some([0, 0, 255, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(19, 19), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_far_off_areas_draw_nothing() {
        let white = [255, 255, 255, 255];
        let mut canvas = Canvas::new(10, 10, &Color::rgb(255, 255, 255));
        let element = ImageElement::new(Frame::fill(), "art.png");
        let source = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));

        element.blit(&mut canvas, &source, Rect::new(3.0e9, 0.0, 100.0, 100.0));
        element.blit(&mut canvas, &source, Rect::new(-3.0e9, -3.0e9, 100.0, 100.0));
        element.blit(&mut canvas, &source, Rect::new(0.0, 0.0, 0.0, 100.0));
        assert!(canvas.image().pixels().all(|p| p.0 == white));

        // A huge area that still overlaps the canvas is clipped to it.
        element.blit(&mut canvas, &source, Rect::new(-1.0e6, -1.0e6, 2.0e6, 2.0e6));
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_image_fit_deserialize() {
        let fit: ImageFit = serde_json::from_str("\"cover\"").unwrap();
        assert_eq!(fit, ImageFit::Cover);
        assert!(serde_json::from_str::<ImageFit>("\"tile\"").is_err());
    }
}
