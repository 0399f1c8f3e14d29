//! Accumulated offset and clip region for the recursive render pass.
//!
//! ```text
//! screen = (local + offset) * scale
//! ```
//!
//! The clip region is kept in unscaled canvas space and only scaled when it
//! is handed to the backend.

use bramble_core::Rect;
use bramble_core::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    offset: Vec2,
    clip: Rect,
    scale: f32,
}

impl RenderTransform {
    pub fn new(clip: Rect, scale: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            clip,
            scale,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    pub fn add_offset(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn clip(&self) -> Rect {
        self.clip
    }

    pub fn set_clip(&mut self, clip: Rect) {
        self.clip = clip;
    }

    /// Intersect the clip region with `local`, interpreted at the current offset.
    pub fn add_clip(&mut self, local: Rect) {
        self.clip = self.clip.intersect(&local.translate(self.offset));
    }

    /// False once the accumulated clip region has no area.
    pub fn clip_visible(&self) -> bool {
        !self.clip.is_empty()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Map a local rectangle to backend coordinates.
    pub fn apply(&self, local: Rect) -> Rect {
        local.translate(self.offset).scale(self.scale)
    }

    pub fn apply_point(&self, local: Vec2) -> Vec2 {
        (local + self.offset) * self.scale
    }

    /// The clip region in backend coordinates.
    pub fn scaled_clip(&self) -> Rect {
        self.clip.scale(self.scale)
    }
}
