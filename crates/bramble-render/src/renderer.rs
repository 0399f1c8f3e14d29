use bramble_core::math::Vec2;
use bramble_core::{Color, Rect, Size};
use std::cell::RefCell;
use std::rc::Rc;

/// A renderer shared between the canvas (text measurement during layout) and
/// the painter (drawing during the render pass).
pub type SharedRenderer = Rc<RefCell<dyn Renderer>>;

/// Identifies an offscreen surface used for cache-to-texture rendering.
///
/// Keys are stable for the lifetime of the control that owns the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(pub u64);

/// Font descriptor. Backends resolve the face name however they like.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub face: String,
    pub size: f32,
}

impl Font {
    pub fn new(face: impl Into<String>, size: f32) -> Self {
        Self {
            face: face.into(),
            size,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("sans", 12.0)
    }
}

/// Texture descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// Backend drawing interface.
///
/// All coordinates handed to a renderer are final: offset, clip and scale
/// have already been applied by the [`Painter`](crate::Painter). While a cache
/// surface is being recorded (between `setup_cache_texture` and
/// `finish_cache_texture`), coordinates are relative to that surface.
pub trait Renderer {
    fn begin(&mut self) {}

    fn end(&mut self) {}

    /// Restrict subsequent draws to `clip`.
    fn start_clip(&mut self, clip: Rect);

    fn end_clip(&mut self);

    fn draw_filled_rect(&mut self, rect: Rect, color: Color);

    /// Outline a rectangle one pixel wide. The default draws four filled strips.
    fn draw_lined_rect(&mut self, rect: Rect, color: Color) {
        self.draw_filled_rect(Rect::new(rect.x, rect.y, rect.width, 1.0), color);
        self.draw_filled_rect(
            Rect::new(rect.x, rect.bottom() - 1.0, rect.width, 1.0),
            color,
        );
        self.draw_filled_rect(Rect::new(rect.x, rect.y, 1.0, rect.height), color);
        self.draw_filled_rect(
            Rect::new(rect.right() - 1.0, rect.y, 1.0, rect.height),
            color,
        );
    }

    /// Draw `texture` into `rect`. `uv` is `[u1, v1, u2, v2]`.
    fn draw_textured_rect(&mut self, texture: &Texture, rect: Rect, uv: [f32; 4], color: Color);

    fn render_text(&mut self, font: &Font, pos: Vec2, text: &str, color: Color);

    fn measure_text(&self, font: &Font, text: &str) -> Size;

    /// Whether the cache-to-texture entry points below are implemented.
    fn supports_cache_to_texture(&self) -> bool {
        false
    }

    /// Redirect drawing into the surface for `key`, creating or resizing it
    /// to `size` and clearing it.
    fn setup_cache_texture(&mut self, _key: CacheKey, _size: Size) {}

    /// Stop drawing into the surface for `key`.
    fn finish_cache_texture(&mut self, _key: CacheKey) {}

    /// Composite the surface for `key` at `dest`, honouring the current clip.
    fn draw_cached_texture(&mut self, _key: CacheKey, _dest: Rect) {}

    /// The surface for `key` will not be used again.
    fn release_cache_texture(&mut self, _key: CacheKey) {}
}
