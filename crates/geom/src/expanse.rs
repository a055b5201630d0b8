use serde::{Deserialize, Serialize};

use super::{Point, Rect};

/// An `Expanse` is a size with no location. It is used for preferred sizes and
/// for anything that must be positioned later.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Expanse {
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Expanse {
    /// Construct a size.
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// Return a `Rect` with the same dimensions, located at the origin.
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }

    /// Grow each dimension to at least the matching dimension of `min`.
    pub fn at_least(&self, min: Self) -> Self {
        Self {
            w: self.w.max(min.w),
            h: self.h.max(min.h),
        }
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(f32, f32)> for Expanse {
    fn from(v: (f32, f32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least() {
        let e = Expanse::new(10.0, 80.0);
        assert_eq!(e.at_least(Expanse::new(50.0, 50.0)), Expanse::new(50.0, 80.0));
        assert_eq!(e.at_least(Expanse::new(5.0, 5.0)), e);
        assert_eq!(Rect::from(e), Rect::new(0.0, 0.0, 10.0, 80.0));
    }
}
