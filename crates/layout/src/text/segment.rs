use crate::text::backend::{TextBackend, TextBounds};
use crate::LayoutError;
use cardwright_render_core::Canvas;
use cardwright_style::{Tag, TextStyle, YAlignment};
use cardwright_types::{Color, Point};
use std::fmt;

/// Glyphs without descenders, measured to get one height per font and size.
pub const REFERENCE_TEXT: &str = "ABCDEFGHIJKLMNOPRSTUVWXYZ1234567890abcdefhiklmnorstuvwxz";

/// One piece of a [`TextLine`](crate::text::TextLine).
pub trait LineSegment: fmt::Debug + Send + Sync {
    /// Width and height this segment occupies in the line.
    fn size(&self) -> Point;

    /// Draws the segment with its box starting at `coords`, aligned
    /// vertically inside a line of `line_size`.
    fn draw(
        &self,
        coords: Point,
        line_size: Point,
        canvas: &mut Canvas,
        align: YAlignment,
        backend: &dyn TextBackend,
    ) -> Result<(), LayoutError>;
}

/// A run of text in a single style.
#[derive(Debug, Clone)]
pub struct TextSegment {
    content: String,
    tags: Vec<Tag>,
    base: TextStyle,
    style: TextStyle,
    ink: TextBounds,
    reference: TextBounds,
    size: Point,
}

impl TextSegment {
    /// Styles `content` by applying `tags` over `base`, then measures it.
    pub fn new(
        content: impl Into<String>,
        base: &TextStyle,
        tags: Vec<Tag>,
        backend: &dyn TextBackend,
    ) -> Result<Self, LayoutError> {
        let mut segment = Self {
            content: content.into(),
            tags: Vec::new(),
            base: base.clone(),
            style: base.clone(),
            ink: TextBounds::default(),
            reference: TextBounds::default(),
            size: Point::zero(),
        };
        segment.apply_tags(tags, backend)?;
        Ok(segment)
    }

    /// Adds `tags` after the existing ones and re-measures.
    pub fn apply_tags(
        &mut self,
        tags: impl IntoIterator<Item = Tag>,
        backend: &dyn TextBackend,
    ) -> Result<(), LayoutError> {
        self.tags.extend(tags);
        self.style = self.base.apply_tags(&self.tags)?;
        self.ink = backend.bounds(&self.content, &self.style)?;
        self.reference = backend.bounds(REFERENCE_TEXT, &self.style)?;
        self.size = self.calculate_size();
        Ok(())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn font(&self) -> &str {
        &self.style.font
    }

    pub fn font_size(&self) -> f32 {
        self.style.font_size
    }

    pub fn fill(&self) -> Color {
        self.style.fill
    }

    /// Height of the reference glyphs, the same for every segment in this font.
    pub fn height(&self) -> f32 {
        self.reference.height()
    }

    pub fn calculate_size(&self) -> Point {
        Point::new(self.ink.width(), self.height())
    }
}

impl LineSegment for TextSegment {
    fn size(&self) -> Point {
        self.size
    }

    fn draw(
        &self,
        coords: Point,
        line_size: Point,
        canvas: &mut Canvas,
        align: YAlignment,
        backend: &dyn TextBackend,
    ) -> Result<(), LayoutError> {
        let y_offset = align.offset(line_size.y, self.height());
        // Put the top of the reference box at the aligned offset and the
        // left edge of the ink at `coords.x`.
        let baseline = Point::new(
            coords.x - self.ink.left,
            coords.y + y_offset - self.reference.top,
        );
        backend.draw_text(canvas, &self.content, &self.style, baseline)
    }
}

impl fmt::Display for TextSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tag in &self.tags {
            f.write_str(&tag.opening_repr())?;
        }
        f.write_str(&self.content)?;
        for tag in &self.tags {
            f.write_str(&tag.closing_repr())?;
        }
        Ok(())
    }
}

/// Blank horizontal space between runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceSegment {
    width: f32,
}

impl SpaceSegment {
    pub fn new(width: f32) -> Self {
        Self {
            width: width.max(0.0),
        }
    }
}

impl LineSegment for SpaceSegment {
    fn size(&self) -> Point {
        Point::x_span(self.width)
    }

    fn draw(
        &self,
        _coords: Point,
        _line_size: Point,
        _canvas: &mut Canvas,
        _align: YAlignment,
        _backend: &dyn TextBackend,
    ) -> Result<(), LayoutError> {
        Ok(())
    }
}
