use serde::{Deserialize, Serialize};

use super::Point;

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineSegment {
    /// Start point.
    pub a: Point,
    /// End point.
    pub b: Point,
}

impl LineSegment {
    /// Construct a segment.
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// A horizontal segment starting at `a` with length `len`.
    pub fn horizontal(a: Point, len: f32) -> Self {
        Self {
            a,
            b: Point::new(a.x + len, a.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal() {
        let s = LineSegment::horizontal(Point::new(1.0, 2.0), 4.0);
        assert_eq!(s, LineSegment::new(Point::new(1.0, 2.0), Point::new(5.0, 2.0)));
    }
}
