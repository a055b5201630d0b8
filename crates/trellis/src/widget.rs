//! Widget trait and event outcome types.

use std::any::{Any, type_name};

use crate::{
    Context, ViewContext,
    error::Result,
    event::PointerEvent,
    render::Render,
};

/// The result of an event handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was claimed. Forwarding that stops at the first claimant
    /// stops here.
    Handle,
    /// The event was not claimed.
    Ignore,
}

impl EventOutcome {
    /// Was the event claimed?
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handle)
    }

    /// Combine two outcomes, claiming if either claimed.
    pub fn or(self, other: Self) -> Self {
        if self.is_handled() || other.is_handled() {
            Self::Handle
        } else {
            Self::Ignore
        }
    }
}

impl From<bool> for EventOutcome {
    fn from(handled: bool) -> Self {
        if handled { Self::Handle } else { Self::Ignore }
    }
}

/// Widgets are the behavior attached to nodes in the tree arena.
///
/// The default pointer handlers implement the common leaf behavior: moves
/// track hover, a primary press over an enabled node marks it pressed, and a
/// release over a pressed node runs [`Widget::activate`].
pub trait Widget: Any {
    /// Render this widget's own content. Does not render children.
    fn render(&mut self, _r: &mut Render, _ctx: &dyn ViewContext) -> Result<()> {
        Ok(())
    }

    /// Pointer moved.
    fn on_pointer_move(
        &mut self,
        event: &PointerEvent,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        let hovered = ctx.hit_test(event.location);
        ctx.set_hovered(hovered);
        Ok(EventOutcome::Ignore)
    }

    /// Pointer button pressed.
    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        if !event.is_primary() {
            return Ok(EventOutcome::Ignore);
        }
        let pressed = ctx.node().enabled() && ctx.hit_test(event.location);
        ctx.set_pressed(pressed);
        Ok(pressed.into())
    }

    /// Pointer button released.
    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut dyn Context) -> Result<EventOutcome> {
        if !event.is_primary() {
            return Ok(EventOutcome::Ignore);
        }
        let was_pressed = ctx.node().pressed();
        if was_pressed && ctx.hit_test(event.location) {
            self.activate(ctx)?;
        }
        ctx.set_pressed(false);
        Ok(was_pressed.into())
    }

    /// Synthetic click following a release. Leaves act on release, so the
    /// default ignores it.
    fn on_click(&mut self, _event: &PointerEvent, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// The widget's designated action, run by the default release handler.
    fn activate(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Recompute internal layout after this node's rect changed.
    fn on_layout(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Called once when the node is inserted into the arena, before it is
    /// attached anywhere. Composite widgets create their fixed children here.
    fn on_mount(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Should the render walker descend into this node's children?
    fn paints_children(&self) -> bool {
        true
    }

    /// Name used in diagnostics.
    fn name(&self) -> &'static str {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
