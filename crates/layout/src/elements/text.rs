use super::{CardElement, CardNode, DrawContext, Frame};
use crate::text::{SpaceSegment, TextLine, TextSegment};
use crate::LayoutError;
use cardwright_style::{Alignment, FontStyle, FontWeight, Tag, TextStyle, YAlignment};
use cardwright_types::{Color, Rect};
use serde::Deserialize;

/// Per-element changes to the schema's default text style.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextOverrides {
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub font_size: Option<f32>,
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub weight: Option<FontWeight>,
    #[serde(default)]
    pub style: Option<FontStyle>,
}

impl TextOverrides {
    pub fn apply(&self, base: &TextStyle) -> TextStyle {
        let mut style = base.clone();
        if let Some(font) = &self.font {
            style.font = font.clone();
        }
        if let Some(size) = self.font_size {
            style.font_size = size;
        }
        if let Some(fill) = self.fill {
            style.fill = fill;
        }
        if let Some(weight) = self.weight {
            style.weight = weight;
        }
        if let Some(font_style) = self.style {
            style.style = font_style;
        }
        style
    }
}

/// One styled run before field substitution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "SegmentRepr")]
pub struct SegmentDef {
    /// Text with `{{field}}` placeholders.
    pub content: String,
    pub tags: Vec<Tag>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SegmentRepr {
    Plain(String),
    Styled {
        content: String,
        #[serde(default)]
        tags: Vec<Tag>,
    },
}

impl From<SegmentRepr> for SegmentDef {
    fn from(repr: SegmentRepr) -> Self {
        match repr {
            SegmentRepr::Plain(content) => SegmentDef::new(content, Vec::new()),
            SegmentRepr::Styled { content, tags } => SegmentDef::new(content, tags),
        }
    }
}

impl SegmentDef {
    pub fn new(content: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            content: content.into(),
            tags,
        }
    }
}

/// A single line of styled runs.
#[derive(Debug, Clone)]
pub struct TextElement {
    pub frame: Frame,
    pub segments: Vec<SegmentDef>,
    pub overrides: TextOverrides,
    /// Placement of the whole line in the area; the frame alignment when unset.
    pub text_alignment: Option<Alignment>,
    /// Vertical alignment of runs of different heights within the line.
    pub line_alignment: YAlignment,
    /// Blank space between consecutive runs, in pixels.
    pub spacing: f32,
    pub children: Vec<CardNode>,
}

impl TextElement {
    pub fn new(frame: Frame, segments: Vec<SegmentDef>) -> Self {
        Self {
            frame,
            segments,
            overrides: TextOverrides::default(),
            text_alignment: None,
            line_alignment: YAlignment::Bottom,
            spacing: 0.0,
            children: Vec::new(),
        }
    }

    pub fn base_style(&self, defaults: &TextStyle) -> TextStyle {
        self.overrides.apply(defaults)
    }

    /// Substitutes fields and measures every run for the current entry.
    pub fn build_line(&self, ctx: &DrawContext<'_>) -> Result<TextLine, LayoutError> {
        let base = self.base_style(&ctx.schema.text);
        let backend = ctx.env.text.as_ref();
        let mut line = TextLine::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && self.spacing > 0.0 {
                line.push(SpaceSegment::new(self.spacing));
            }
            let content = ctx.render_field(&segment.content)?;
            line.push(TextSegment::new(content, &base, segment.tags.clone(), backend)?);
        }
        Ok(line)
    }
}

impl CardElement for TextElement {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn children(&self) -> &[CardNode] {
        &self.children
    }

    fn draw_self(&self, ctx: &mut DrawContext<'_>, area: Rect) -> Result<(), LayoutError> {
        let line = self.build_line(ctx)?;
        if line.is_empty() {
            return Ok(());
        }
        let alignment = self.text_alignment.unwrap_or(self.frame.alignment);
        let placed = alignment.place(line.size(), area);
        line.draw(
            placed.origin(),
            ctx.canvas,
            self.line_alignment,
            ctx.env.text.as_ref(),
        )
    }
}
