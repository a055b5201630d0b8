use crate::{
    Context,
    error::Result,
    event::PointerEvent,
    widget::{EventOutcome, Widget},
};

/// Which part of a menu's chrome a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeKind {
    /// The title strip.
    TitleBar,
    /// The close control.
    Close,
    /// The collapse control.
    Collapse,
}

/// A chrome sub-node of a [`Menu`](super::Menu).
///
/// Chrome nodes carry geometry and hover state only. The owning menu decides
/// what a press on them means and paints them itself.
#[derive(Debug)]
pub struct Chrome {
    /// Role of this node.
    kind: ChromeKind,
}

impl Chrome {
    /// Construct a chrome node.
    pub fn new(kind: ChromeKind) -> Self {
        Self { kind }
    }

    /// Role of this node.
    pub fn kind(&self) -> ChromeKind {
        self.kind
    }
}

impl Widget for Chrome {
    /// Hover uses plain geometry: the title strip sits outside the body clip
    /// the menu imposes on its children.
    fn on_pointer_move(
        &mut self,
        event: &PointerEvent,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        let hovered = ctx.contains_of(ctx.node_id(), event.location);
        ctx.set_hovered(hovered);
        Ok(EventOutcome::Ignore)
    }

    fn on_pointer_down(
        &mut self,
        _event: &PointerEvent,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    fn on_pointer_up(
        &mut self,
        _event: &PointerEvent,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }
}
