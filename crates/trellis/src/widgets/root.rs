use crate::{
    Context,
    error::Result,
    event::PointerEvent,
    widget::{EventOutcome, Widget},
};

/// The default tree root. It fills the host area, paints nothing, and hands
/// every event to its children, topmost first.
///
/// Moves and releases reach every child so hover and capture state stay
/// current everywhere; presses and clicks stop at the first child that
/// claims them.
#[derive(Debug, Default)]
pub struct Root;

impl Root {
    /// Construct a root.
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Root {
    fn on_pointer_move(
        &mut self,
        event: &PointerEvent,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        ctx.forward_all(event)
    }

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        ctx.forward_first(event)
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut dyn Context) -> Result<EventOutcome> {
        ctx.forward_all(event)
    }

    fn on_click(&mut self, event: &PointerEvent, ctx: &mut dyn Context) -> Result<EventOutcome> {
        ctx.forward_first(event)
    }
}
