use crate::error::RenderError;
use crate::types::RenderedCard;

/// Consumes rendered cards in entry order.
pub trait CardSink {
    fn accept(&mut self, card: RenderedCard) -> Result<(), RenderError>;

    /// Called once after the last card.
    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

impl<S: CardSink + ?Sized> CardSink for &mut S {
    fn accept(&mut self, card: RenderedCard) -> Result<(), RenderError> {
        (**self).accept(card)
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        (**self).finish()
    }
}
