//! Turning level-triggered host samples into edge-triggered events.

use tracing::trace;

use crate::{
    error::Result,
    event::{Button, PointerEvent},
    geom::Point,
    tree::Tree,
    widget::EventOutcome,
};

/// Buttons that are currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ButtonSet {
    /// Primary button.
    pub left: bool,
    /// Secondary button.
    pub right: bool,
    /// Middle button.
    pub middle: bool,
}

impl ButtonSet {
    /// Buttons the router tracks, in the order edges are reported.
    pub const TRACKED: [Button; 3] = [Button::Left, Button::Right, Button::Middle];

    /// No buttons held.
    pub fn none() -> Self {
        Self::default()
    }

    /// Is `button` held?
    pub fn contains(&self, button: Button) -> bool {
        match button {
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Middle => self.middle,
            Button::None => false,
        }
    }

    /// A copy with `button` set to `down`.
    pub fn with(mut self, button: Button, down: bool) -> Self {
        match button {
            Button::Left => self.left = down,
            Button::Right => self.right = down,
            Button::Middle => self.middle = down,
            Button::None => {}
        }
        self
    }
}

/// One host sample of the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Absolute pointer position.
    pub position: Point,
    /// Buttons held at sample time.
    pub buttons: ButtonSet,
}

impl PointerState {
    /// A sample with no buttons held.
    pub fn at(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            buttons: ButtonSet::none(),
        }
    }

    /// A sample with only the primary button held.
    pub fn pressed(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            buttons: ButtonSet::none().with(Button::Left, true),
        }
    }
}

/// Edge detector over successive pointer samples.
///
/// Button state persists across polls; every poll yields a `Move`, then for
/// each tracked button a `Down` on an up-to-down transition, or an `Up`
/// followed by a `Click` on a down-to-up transition.
#[derive(Debug, Default)]
pub struct InputRouter {
    /// Buttons held at the previous poll.
    previous: ButtonSet,
}

impl InputRouter {
    /// A router that believes no buttons are held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous sample.
    pub fn reset(&mut self) {
        self.previous = ButtonSet::none();
    }

    /// Buttons seen at the last poll.
    pub fn previous(&self) -> ButtonSet {
        self.previous
    }

    /// Produce the ordered events for one sample.
    pub fn poll(&mut self, state: &PointerState) -> Vec<PointerEvent> {
        let p = state.position;
        let mut events = vec![PointerEvent::moved(p)];
        for button in ButtonSet::TRACKED {
            let was = self.previous.contains(button);
            let now = state.buttons.contains(button);
            match (was, now) {
                (false, true) => {
                    trace!(?button, x = p.x, y = p.y, "button down");
                    events.push(PointerEvent::down(button, p));
                }
                (true, false) => {
                    trace!(?button, x = p.x, y = p.y, "button up");
                    events.push(PointerEvent::up(button, p));
                    events.push(PointerEvent::click(button, p));
                }
                _ => {}
            }
        }
        self.previous = state.buttons;
        events
    }

    /// Poll and deliver every event to the root of `tree`, in order.
    pub fn route(&mut self, state: &PointerState, tree: &mut Tree) -> Result<EventOutcome> {
        let mut outcome = EventOutcome::Ignore;
        for event in self.poll(state) {
            outcome = outcome.or(tree.dispatch(&event)?);
        }
        Ok(outcome)
    }
}
