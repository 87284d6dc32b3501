use cardwright_style::{Alignment, Extent, Offset};
use cardwright_types::{Entry, Point, Rect};
use serde::Deserialize;

fn default_visible() -> bool {
    true
}

/// Where an element sits relative to its parent's area.
///
/// `offset` and `size` resolve against the parent size; `alignment` picks both
/// the parent anchor the offset starts from and the element's own anchor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub offset: Offset,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub size: Extent,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Entry field that must be truthy for the element to be drawn.
    #[serde(default)]
    pub show_if: Option<String>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            offset: Offset::zero(),
            alignment: Alignment::TopLeft,
            size: Extent::zero(),
            visible: true,
            show_if: None,
        }
    }
}

impl Frame {
    pub fn new(offset: Offset, alignment: Alignment, size: Extent) -> Self {
        Self {
            offset,
            alignment,
            size,
            ..Default::default()
        }
    }

    /// A frame covering the whole parent area.
    pub fn fill() -> Self {
        Self::new(Offset::zero(), Alignment::TopLeft, Extent::relative(1.0, 1.0))
    }

    pub fn with_show_if(mut self, field: impl Into<String>) -> Self {
        self.show_if = Some(field.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// The absolute rectangle of this frame inside `parent_area`.
    pub fn calculate_area(&self, parent_area: Rect) -> Rect {
        let parent_size = parent_area.size();
        let origin = self.alignment.root(parent_area);
        let off = self.offset.scale(parent_size);
        let sz = self.size.scale(parent_size);
        let anchor = self.alignment.root(Point::zero().to(sz));
        Rect::from_points(origin + off - anchor, origin + off + sz - anchor)
    }

    pub fn is_visible(&self, entry: &Entry) -> bool {
        self.visible
            && self
                .show_if
                .as_deref()
                .is_none_or(|field| entry.is_truthy(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardwright_style::Dimension;

    const PARENT: Rect = Rect::new(0.0, 0.0, 200.0, 100.0);

    #[test]
    fn test_top_left_relative_frame() {
        let frame = Frame::new(
            Offset::relative(0.1, 0.2),
            Alignment::TopLeft,
            Extent::relative(0.5, 0.5),
        );
        assert_eq!(frame.calculate_area(PARENT), Rect::new(20.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn test_bottom_right_anchor_subtracts_size() {
        let frame = Frame::new(Offset::px(-5.0, -5.0), Alignment::BottomRight, Extent::px(40.0, 20.0));
        assert_eq!(frame.calculate_area(PARENT), Rect::new(155.0, 75.0, 40.0, 20.0));
    }

    #[test]
    fn test_middle_anchor_centres() {
        let frame = Frame::new(Offset::zero(), Alignment::Middle, Extent::px(50.0, 10.0));
        let area = frame.calculate_area(Rect::new(100.0, 100.0, 200.0, 100.0));
        assert_eq!(area, Rect::new(175.0, 145.0, 50.0, 10.0));
    }

    #[test]
    fn test_mixed_units() {
        let frame = Frame::new(
            Offset::new(Dimension::Px(12.0), Dimension::Relative(0.5)),
            Alignment::TopLeft,
            Extent::new(Dimension::Relative(1.0), Dimension::Px(8.0)),
        );
        assert_eq!(
            frame.calculate_area(Rect::new(10.0, 10.0, 80.0, 40.0)),
            Rect::new(22.0, 30.0, 80.0, 8.0)
        );
    }

    #[test]
    fn test_default_frame_is_zero_sized_at_parent_origin() {
        let area = Frame::default().calculate_area(Rect::new(5.0, 6.0, 50.0, 50.0));
        assert_eq!(area, Rect::new(5.0, 6.0, 0.0, 0.0));
        assert_eq!(Frame::fill().calculate_area(PARENT), PARENT);
    }

    #[test]
    fn test_visibility() {
        let entry: Entry = [("foil", "true"), ("promo", "0")].into_iter().collect();
        assert!(Frame::default().is_visible(&entry));
        assert!(!Frame::default().hidden().is_visible(&entry));
        assert!(Frame::default().with_show_if("foil").is_visible(&entry));
        assert!(!Frame::default().with_show_if("promo").is_visible(&entry));
        assert!(!Frame::default().with_show_if("missing").is_visible(&entry));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let frame: Frame = serde_json::from_str(
            r#"{"offset": [0.5, "10px"], "alignment": "top-center", "size": [0.8, 40]}"#,
        )
        .unwrap();
        assert_eq!(frame.alignment, Alignment::TopCenter);
        assert_eq!(frame.size, Extent::new(Dimension::Relative(0.8), Dimension::Px(40.0)));
        assert!(frame.visible);
        assert!(frame.show_if.is_none());
    }
}
