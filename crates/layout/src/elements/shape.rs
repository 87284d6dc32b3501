use super::{CardElement, CardNode, DrawContext, Frame};
use crate::LayoutError;
use cardwright_types::{Color, Rect};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    #[serde(alias = "rect")]
    Rectangle,
    #[serde(alias = "circle", alias = "oval")]
    Ellipse,
}

/// A filled and/or outlined primitive covering the element area.
#[derive(Debug, Clone)]
pub struct ShapeElement {
    pub frame: Frame,
    pub kind: ShapeKind,
    pub fill: Option<Color>,
    pub outline: Option<Color>,
    pub outline_width: f32,
    pub children: Vec<CardNode>,
}

impl ShapeElement {
    pub fn new(frame: Frame, kind: ShapeKind) -> Self {
        Self {
            frame,
            kind,
            fill: None,
            outline: None,
            outline_width: 1.0,
            children: Vec::new(),
        }
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_outline(mut self, color: Color, width: f32) -> Self {
        self.outline = Some(color);
        self.outline_width = width;
        self
    }
}

impl CardElement for ShapeElement {
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
        if let Some(fill) = &self.fill {
            match self.kind {
                ShapeKind::Rectangle => ctx.canvas.fill_rect(&area, fill),
                ShapeKind::Ellipse => ctx.canvas.fill_ellipse(&area, fill),
            }
        }
        if let Some(outline) = &self.outline {
            if self.outline_width > 0.0 {
                match self.kind {
                    ShapeKind::Rectangle => ctx.canvas.stroke_rect(&area, outline, self.outline_width),
                    ShapeKind::Ellipse => ctx.canvas.stroke_ellipse(&area, outline, self.outline_width),
                }
            }
        }
        Ok(())
    }
}
