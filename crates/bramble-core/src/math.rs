/// Vector types used for points, offsets and deltas.
///
/// Re-exports [`glam`] so downstream crates do not need their own dependency on it.
///
/// ```
/// use bramble_core::math::Vec2;
///
/// let cursor = Vec2::new(10.0, 20.0);
/// let moved = cursor + Vec2::new(2.0, -4.0);
/// assert_eq!(moved, Vec2::new(12.0, 16.0));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

pub use fast::{Vec2, vec2};

/// Manhattan distance between two points.
///
/// Used for drag and double-click thresholds, which are measured in whole
/// pixels along each axis rather than as a radius.
#[inline]
pub fn manhattan(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
