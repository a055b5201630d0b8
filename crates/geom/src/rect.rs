use serde::{Deserialize, Serialize};

use super::{Expanse, Point};
use crate::{Error, Result};

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Construct a rectangle from a location and a size.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// The zero rectangle at the origin.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Construct a rectangle from its four edges. Inverted edges collapse to a
    /// zero extent rather than producing a negative size.
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    /// Construct a rectangle from its four edges, rejecting inverted edges.
    pub fn try_from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Result<Self> {
        if right < left || bottom < top {
            return Err(Error::Geometry(format!(
                "inverted rectangle: ({left}, {top})-({right}, {bottom})"
            )));
        }
        Ok(Self::from_edges(left, top, right, bottom))
    }

    /// Construct a rectangle at a point with a size.
    pub fn at(tl: Point, size: Expanse) -> Self {
        Self {
            tl,
            w: size.w,
            h: size.h,
        }
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.tl.x
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.tl.y
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.tl.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.tl.y + self.h
    }

    /// Bottom-right corner.
    pub fn br(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Size of the rectangle.
    pub fn size(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// True if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Does this rectangle contain the point? Both edges are inclusive.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// The overlap of two rectangles, if they overlap with a non-empty area.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            None
        } else {
            Some(Self::from_edges(left, top, right, bottom))
        }
    }

    /// Translate the rectangle by an offset.
    pub fn shift(&self, by: Point) -> Self {
        Self {
            tl: self.tl + by,
            w: self.w,
            h: self.h,
        }
    }

    /// Split off a strip of height `h` from the top, returning (head, tail).
    /// If the rectangle is shorter than `h`, the head takes all of it and the
    /// tail is empty.
    pub fn carve_top(&self, h: f32) -> (Self, Self) {
        let h = h.clamp(0.0, self.h);
        (
            Self::new(self.tl.x, self.tl.y, self.w, h),
            Self::new(self.tl.x, self.tl.y + h, self.w, self.h - h),
        )
    }

    /// Split off a strip of width `w` from the right, returning (head, tail)
    /// where the tail is the strip.
    pub fn carve_right(&self, w: f32) -> (Self, Self) {
        let w = w.clamp(0.0, self.w);
        (
            Self::new(self.tl.x, self.tl.y, self.w - w, self.h),
            Self::new(self.right() - w, self.tl.y, w, self.h),
        )
    }

    /// A square of side `side` anchored in the bottom-right corner. The square
    /// never extends past the rectangle.
    pub fn bottom_right_square(&self, side: f32) -> Self {
        let w = side.clamp(0.0, self.w);
        let h = side.clamp(0.0, self.h);
        Self::new(self.right() - w, self.bottom() - h, w, h)
    }
}

impl From<Expanse> for Rect {
    fn from(e: Expanse) -> Self {
        e.rect()
    }
}
