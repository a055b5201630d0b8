//! Geometry primitives used across trellis.
//!
//! All coordinates are `f32` surface units. Rectangles are stored as a
//! top-left point plus a size, with edge accessors for the left/top/right/bottom
//! view the widget tree works in.

/// Error types for geometry operations.
mod error;
/// Width/height size type.
mod expanse;
/// Line segment between two points.
mod linesegment;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use error::{Error, Result};
pub use expanse::Expanse;
pub use linesegment::LineSegment;
pub use point::Point;
pub use rect::Rect;
