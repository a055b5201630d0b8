//! Vertical stacking for container children.

use crate::geom::{Expanse, Point, Rect};

/// A transient accumulator that stacks children top to bottom.
///
/// Each placement lands at the cursor and advances it by the placed height
/// plus the spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    /// Horizontal position of every placement.
    pub x: f32,
    /// Vertical position of the next placement.
    pub y: f32,
    /// Gap inserted after each placement.
    pub spacing_y: f32,
}

impl LayoutCursor {
    /// Start a cursor at `(x, y)`.
    pub fn new(x: f32, y: f32, spacing_y: f32) -> Self {
        Self { x, y, spacing_y }
    }

    /// The position of the next placement.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Place an item of the given size and advance.
    pub fn place(&mut self, size: Expanse) -> Rect {
        let rect = Rect::at(self.position(), size);
        self.y += size.h + self.spacing_y;
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacks() {
        let mut c = LayoutCursor::new(10.0, 22.0, 4.0);
        assert_eq!(c.place(Expanse::new(120.0, 26.0)), Rect::new(10.0, 22.0, 120.0, 26.0));
        assert_eq!(c.place(Expanse::new(80.0, 20.0)), Rect::new(10.0, 52.0, 80.0, 20.0));
        assert_eq!(c.position(), Point::new(10.0, 76.0));
    }

    #[test]
    fn zero_height_still_spaces() {
        let mut c = LayoutCursor::new(0.0, 0.0, 4.0);
        c.place(Expanse::new(10.0, 0.0));
        assert_eq!(c.y, 4.0);
    }
}
