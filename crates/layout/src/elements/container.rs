use super::{CardElement, CardNode, DrawContext, Frame};
use crate::LayoutError;
use cardwright_style::Offset;
use cardwright_types::{Entry, Rect};
use serde::Deserialize;

/// How many times a repeated container draws its children.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RepeatCount {
    Fixed(usize),
    /// Read from an entry field; a missing or blank field means zero.
    Field(String),
}

impl RepeatCount {
    /// The count for `entry`, failing when it exceeds `limit`.
    pub fn resolve(&self, entry: &Entry, limit: usize) -> Result<usize, LayoutError> {
        let (field, value) = match self {
            RepeatCount::Fixed(n) => ("count", n.to_string()),
            RepeatCount::Field(field) => {
                let value = entry.get(field).unwrap_or("").trim();
                if value.is_empty() {
                    return Ok(0);
                }
                (field.as_str(), value.to_string())
            }
        };
        match value.parse::<usize>() {
            Ok(n) if n <= limit => Ok(n),
            _ => Err(LayoutError::InvalidRepeatCount {
                field: field.to_string(),
                value,
                limit,
            }),
        }
    }
}

/// Draws the children several times, shifting the area by `step` each time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repeat {
    pub count: RepeatCount,
    /// Resolved against the container's own size.
    #[serde(default)]
    pub step: Offset,
}

/// Groups children under a shared frame. Draws nothing itself.
#[derive(Debug, Clone)]
pub struct ContainerElement {
    pub frame: Frame,
    pub repeat: Option<Repeat>,
    pub children: Vec<CardNode>,
}

impl ContainerElement {
    pub fn new(frame: Frame, children: Vec<CardNode>) -> Self {
        Self {
            frame,
            repeat: None,
            children,
        }
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = Some(repeat);
        self
    }
}

impl CardElement for ContainerElement {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn children(&self) -> &[CardNode] {
        &self.children
    }

    fn draw_self(&self, _ctx: &mut DrawContext<'_>, _area: Rect) -> Result<(), LayoutError> {
        Ok(())
    }

    fn draw_children(&self, ctx: &mut DrawContext<'_>, area: Rect) -> Result<(), LayoutError> {
        let Some(repeat) = &self.repeat else {
            for child in &self.children {
                child.draw(ctx, area)?;
            }
            return Ok(());
        };

        let count = repeat.count.resolve(ctx.entry, ctx.env.config.max_repeat)?;
        let step = repeat.step.scale(area.size());
        let outer = ctx.repeat;
        let result = (0..count).try_for_each(|i| {
            ctx.repeat = Some(i);
            let shifted = area.translate(step * i as f32);
            self.children
                .iter()
                .try_for_each(|child| child.draw(ctx, shifted))
        });
        ctx.repeat = outer;
        result
    }
}
