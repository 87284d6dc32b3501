use crate::LayoutError;
use cardwright_render_core::Canvas;
use cardwright_style::TextStyle;
use cardwright_types::{Point, Rect};

/// The ink box of a run of text, relative to the pen origin on the baseline.
///
/// `y` grows downward, so glyphs rising above the baseline have a negative
/// `top`. `left`/`right` also cover the pen advance, so trailing spaces count
/// towards the width.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    /// Total pen advance of the run.
    pub advance: f32,
}

impl TextBounds {
    /// Bounds of a run that draws nothing but still advances the pen.
    pub fn blank(advance: f32) -> Self {
        Self {
            left: advance.min(0.0),
            top: 0.0,
            right: advance.max(0.0),
            bottom: 0.0,
            advance,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// The ink box in canvas space for a run drawn with its pen origin at `origin`.
    pub fn at(&self, origin: Point) -> Rect {
        Point::new(origin.x + self.left, origin.y + self.top)
            .to(Point::new(origin.x + self.right, origin.y + self.bottom))
    }
}

/// The seam between layout and whatever measures and paints glyphs.
pub trait TextBackend: Send + Sync {
    /// Measures `text` as drawn in `style`.
    fn bounds(&self, text: &str, style: &TextStyle) -> Result<TextBounds, LayoutError>;

    /// Paints `text` with its pen origin on the baseline at `baseline_origin`.
    fn draw_text(
        &self,
        canvas: &mut Canvas,
        text: &str,
        style: &TextStyle,
        baseline_origin: Point,
    ) -> Result<(), LayoutError>;

    /// Returns a human-readable name for this backend (for logging/debugging).
    fn name(&self) -> &'static str;
}
