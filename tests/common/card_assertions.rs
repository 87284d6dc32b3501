use cardwright::RenderedCard;

/// The RGBA value at `(x, y)`, panicking with the card size when out of range.
pub fn pixel(card: &RenderedCard, x: u32, y: u32) -> [u8; 4] {
    assert!(
        x < card.width() && y < card.height(),
        "pixel ({}, {}) is outside the {}x{} card",
        x,
        y,
        card.width(),
        card.height()
    );
    card.image.get_pixel(x, y).0
}

/// Number of pixels in the card with exactly this color.
pub fn count_color(card: &RenderedCard, rgba: [u8; 4]) -> usize {
    card.image.pixels().filter(|p| p.0 == rgba).count()
}

/// Assert the color of one pixel of a rendered card
#[macro_export]
macro_rules! assert_card_pixel {
    ($card:expr, ($x:expr, $y:expr), $rgba:expr) => {
        let actual = $crate::common::card_assertions::pixel(&$card, $x, $y);
        assert_eq!(
            actual, $rgba,
            "Pixel ({}, {}) of card '{}' should be {:?}, was {:?}",
            $x, $y, $card.file_name, $rgba, actual
        );
    };
}

/// Assert that a rendered card contains at least one pixel of a color
#[macro_export]
macro_rules! assert_card_has_color {
    ($card:expr, $rgba:expr) => {
        assert!(
            $crate::common::card_assertions::count_color(&$card, $rgba) > 0,
            "Card '{}' should contain color {:?}",
            $card.file_name,
            $rgba
        );
    };
}

/// Assert that a rendered card contains no pixel of a color
#[macro_export]
macro_rules! assert_card_lacks_color {
    ($card:expr, $rgba:expr) => {
        assert_eq!(
            $crate::common::card_assertions::count_color(&$card, $rgba),
            0,
            "Card '{}' should not contain color {:?}",
            $card.file_name,
            $rgba
        );
    };
}
