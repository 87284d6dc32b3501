use crate::fonts::FontInstance;
use crate::text::backend::TextBounds;
use crate::LayoutError;
use rustybuzz::{Feature, UnicodeBuffer};
use std::cell::RefCell;
use std::sync::OnceLock;
use ttf_parser::{GlyphId, Tag};

// Reuse buffer to avoid allocations in the tight loop
thread_local! {
    static SCRATCH_BUFFER: RefCell<Option<UnicodeBuffer>> = RefCell::new(Some(UnicodeBuffer::new()));
}

fn features() -> &'static [Feature] {
    static FEATURES: OnceLock<Vec<Feature>> = OnceLock::new();
    FEATURES.get_or_init(|| {
        vec![
            Feature::new(Tag::from_bytes(b"liga"), 1, ..),
            Feature::new(Tag::from_bytes(b"kern"), 1, ..),
        ]
    })
}

/// One positioned glyph, in pixels relative to the run's pen origin.
#[derive(Debug, Clone)]
pub struct GlyphInstance {
    pub glyph_id: u16,
    /// Pen x plus the shaper's horizontal offset.
    pub x: f32,
    /// Vertical displacement, positive downward.
    pub y: f32,
    pub x_advance: f32,
    pub cluster: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ShapedRun {
    pub glyphs: Vec<GlyphInstance>,
    pub bounds: TextBounds,
    pub font_size: f32,
}

/// Shapes `text` at `font_size` pixels and measures its ink box.
pub fn shape_text(font: &FontInstance, text: &str, font_size: f32) -> Result<ShapedRun, LayoutError> {
    let face = font
        .as_face()
        .ok_or_else(|| LayoutError::Shaping("font data has no usable face".to_string()))?;
    if text.is_empty() {
        return Ok(ShapedRun {
            font_size,
            ..Default::default()
        });
    }

    let scale = font_size / face.units_per_em() as f32;

    let mut buffer =
        SCRATCH_BUFFER.with(|b| b.borrow_mut().take().unwrap_or_else(UnicodeBuffer::new));
    buffer.push_str(text);
    buffer.guess_segment_properties();

    let glyph_buffer = rustybuzz::shape(&face, features(), buffer);

    let mut glyphs = Vec::with_capacity(glyph_buffer.len());
    let mut ink: Option<(f32, f32, f32, f32)> = None;
    let mut pen_x = 0.0;

    for (info, pos) in glyph_buffer
        .glyph_infos()
        .iter()
        .zip(glyph_buffer.glyph_positions())
    {
        let glyph_id = info.glyph_id as u16;
        let x = pen_x + pos.x_offset as f32 * scale;
        let y = -(pos.y_offset as f32) * scale;

        if let Some(bbox) = face.glyph_bounding_box(GlyphId(glyph_id)) {
            let left = x + bbox.x_min as f32 * scale;
            let right = x + bbox.x_max as f32 * scale;
            let top = y - bbox.y_max as f32 * scale;
            let bottom = y - bbox.y_min as f32 * scale;
            ink = Some(match ink {
                None => (left, top, right, bottom),
                Some((l, t, r, b)) => (l.min(left), t.min(top), r.max(right), b.max(bottom)),
            });
        }

        let x_advance = pos.x_advance as f32 * scale;
        glyphs.push(GlyphInstance {
            glyph_id,
            x,
            y,
            x_advance,
            cluster: info.cluster,
        });
        pen_x += x_advance;
    }

    let recycled_buffer = glyph_buffer.clear();
    SCRATCH_BUFFER.with(|b| *b.borrow_mut() = Some(recycled_buffer));

    let bounds = match ink {
        Some((left, top, right, bottom)) => TextBounds {
            left: left.min(0.0),
            top,
            right: right.max(pen_x),
            bottom,
            advance: pen_x,
        },
        None => TextBounds::blank(pen_x),
    };

    Ok(ShapedRun {
        glyphs,
        bounds,
        font_size,
    })
}
