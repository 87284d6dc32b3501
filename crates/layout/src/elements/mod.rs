//! The card element tree.
//!
//! Every element owns a [`Frame`] that resolves its rectangle against the
//! parent's, draws its own pixels into that rectangle and then hands the same
//! rectangle down to its children.

mod container;
mod frame;
mod image;
mod shape;
mod text;

pub use self::container::{ContainerElement, Repeat, RepeatCount};
pub use self::frame::Frame;
pub use self::image::{fit_rect, ImageElement, ImageFit};
pub use self::shape::{ShapeElement, ShapeKind};
pub use self::text::{SegmentDef, TextElement, TextOverrides};

use crate::environment::RenderEnvironment;
use crate::schema::Schema;
use crate::LayoutError;
use cardwright_render_core::Canvas;
use cardwright_types::{Entry, Rect};

/// Everything an element needs while drawing one card.
pub struct DrawContext<'a> {
    pub canvas: &'a mut Canvas,
    pub entry: &'a Entry,
    pub schema: &'a Schema,
    pub env: &'a RenderEnvironment,
    /// Position of the entry in its source.
    pub index: usize,
    /// Current iteration of the innermost repeated container.
    pub repeat: Option<usize>,
}

impl<'a> DrawContext<'a> {
    pub fn new(
        canvas: &'a mut Canvas,
        entry: &'a Entry,
        schema: &'a Schema,
        env: &'a RenderEnvironment,
        index: usize,
    ) -> Self {
        Self {
            canvas,
            entry,
            schema,
            env,
            index,
            repeat: None,
        }
    }

    /// Substitutes entry fields into `template`.
    pub fn render_field(&self, template: &str) -> Result<String, LayoutError> {
        self.env
            .templates
            .render_scoped(template, self.entry, self.index, self.repeat)
    }
}

pub trait CardElement {
    fn frame(&self) -> &Frame;

    fn children(&self) -> &[CardNode];

    fn calculate_area(&self, parent_area: Rect) -> Rect {
        self.frame().calculate_area(parent_area)
    }

    /// Paints this element's own pixels into `area`.
    fn draw_self(&self, ctx: &mut DrawContext<'_>, area: Rect) -> Result<(), LayoutError>;

    fn draw_children(&self, ctx: &mut DrawContext<'_>, area: Rect) -> Result<(), LayoutError> {
        for child in self.children() {
            child.draw(ctx, area)?;
        }
        Ok(())
    }

    /// Skips invisible elements, otherwise draws self and then children.
    fn draw(&self, ctx: &mut DrawContext<'_>, parent_area: Rect) -> Result<(), LayoutError> {
        if !self.frame().is_visible(ctx.entry) {
            return Ok(());
        }
        let area = self.calculate_area(parent_area);
        self.draw_self(ctx, area)?;
        self.draw_children(ctx, area)
    }
}

/// The closed set of element kinds a schema can describe.
#[derive(Debug, Clone)]
pub enum CardNode {
    Container(ContainerElement),
    Text(TextElement),
    Image(ImageElement),
    Shape(ShapeElement),
}

impl CardNode {
    fn inner(&self) -> &dyn CardElement {
        match self {
            CardNode::Container(e) => e,
            CardNode::Text(e) => e,
            CardNode::Image(e) => e,
            CardNode::Shape(e) => e,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CardNode::Container(_) => "container",
            CardNode::Text(_) => "text",
            CardNode::Image(_) => "image",
            CardNode::Shape(_) => "shape",
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(CardNode::node_count).sum::<usize>()
    }
}

impl CardElement for CardNode {
    fn frame(&self) -> &Frame {
        self.inner().frame()
    }

    fn children(&self) -> &[CardNode] {
        self.inner().children()
    }

    fn calculate_area(&self, parent_area: Rect) -> Rect {
        self.inner().calculate_area(parent_area)
    }

    fn draw_self(&self, ctx: &mut DrawContext<'_>, area: Rect) -> Result<(), LayoutError> {
        self.inner().draw_self(ctx, area)
    }

    fn draw_children(&self, ctx: &mut DrawContext<'_>, area: Rect) -> Result<(), LayoutError> {
        self.inner().draw_children(ctx, area)
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, parent_area: Rect) -> Result<(), LayoutError> {
        self.inner().draw(ctx, parent_area)
    }
}
