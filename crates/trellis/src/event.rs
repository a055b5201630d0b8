//! Semantic pointer events delivered into the widget tree.

use crate::geom::Point;

/// Pointer button codes.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Button {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
    /// No button (for moves).
    None,
}

/// Pointer action kinds.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Action {
    /// The pointer moved, or was re-sampled in place.
    Move,
    /// A button went down.
    Down,
    /// A button went up.
    Up,
    /// Synthesized after every `Up`, at the same position.
    Click,
}

/// An edge-triggered pointer event in absolute surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub action: Action,
    /// Which button, `Button::None` for moves.
    pub button: Button,
    /// Absolute pointer position.
    pub location: Point,
}

impl PointerEvent {
    /// A move to `location`.
    pub fn moved(location: impl Into<Point>) -> Self {
        Self {
            action: Action::Move,
            button: Button::None,
            location: location.into(),
        }
    }

    /// A press of `button` at `location`.
    pub fn down(button: Button, location: impl Into<Point>) -> Self {
        Self {
            action: Action::Down,
            button,
            location: location.into(),
        }
    }

    /// A release of `button` at `location`.
    pub fn up(button: Button, location: impl Into<Point>) -> Self {
        Self {
            action: Action::Up,
            button,
            location: location.into(),
        }
    }

    /// A click of `button` at `location`.
    pub fn click(button: Button, location: impl Into<Point>) -> Self {
        Self {
            action: Action::Click,
            button,
            location: location.into(),
        }
    }

    /// Is this event driven by the primary button?
    pub fn is_primary(&self) -> bool {
        self.button == Button::Left
    }
}
