use crate::text::backend::TextBackend;
use crate::text::segment::LineSegment;
use crate::LayoutError;
use cardwright_render_core::Canvas;
use cardwright_style::YAlignment;
use cardwright_types::Point;

/// Segments laid out left to right on a single line. Nothing wraps.
#[derive(Debug, Default)]
pub struct TextLine {
    segments: Vec<Box<dyn LineSegment>>,
}

impl TextLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl LineSegment + 'static) {
        self.segments.push(Box::new(segment));
    }

    pub fn with(mut self, segment: impl LineSegment + 'static) -> Self {
        self.push(segment);
        self
    }

    pub fn segments(&self) -> &[Box<dyn LineSegment>] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of the segment widths by the tallest segment.
    pub fn size(&self) -> Point {
        self.segments.iter().fold(Point::zero(), |acc, s| {
            let size = s.size();
            Point::new(acc.x + size.x, acc.y.max(size.y))
        })
    }

    /// Draws the line with its top-left corner at `origin`.
    pub fn draw(
        &self,
        origin: Point,
        canvas: &mut Canvas,
        align: YAlignment,
        backend: &dyn TextBackend,
    ) -> Result<(), LayoutError> {
        let line_size = self.size();
        let mut coords = origin;
        for segment in &self.segments {
            segment.draw(coords, line_size, canvas, align, backend)?;
            coords = coords + Point::x_span(segment.size().x);
        }
        Ok(())
    }
}
