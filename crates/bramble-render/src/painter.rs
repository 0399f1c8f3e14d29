use crate::renderer::{CacheKey, Font, SharedRenderer, Texture};
use crate::transform::RenderTransform;
use bramble_core::math::Vec2;
use bramble_core::{Color, Rect, Size};

/// Draws in control-local coordinates.
///
/// The painter owns the render transform for one frame. The render pipeline
/// pushes offsets and clip regions as it descends the tree and restores them
/// on the way back up; widgets and skins only ever see local coordinates.
pub struct Painter {
    renderer: SharedRenderer,
    transform: RenderTransform,
}

impl Painter {
    pub fn new(renderer: SharedRenderer, clip: Rect, scale: f32) -> Self {
        Self {
            renderer,
            transform: RenderTransform::new(clip, scale),
        }
    }

    pub fn transform(&self) -> &RenderTransform {
        &self.transform
    }

    pub fn offset(&self) -> Vec2 {
        self.transform.offset()
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.transform.set_offset(offset);
    }

    pub fn add_offset(&mut self, delta: Vec2) {
        self.transform.add_offset(delta);
    }

    pub fn clip_region(&self) -> Rect {
        self.transform.clip()
    }

    pub fn set_clip_region(&mut self, clip: Rect) {
        self.transform.set_clip(clip);
    }

    pub fn add_clip_region(&mut self, local: Rect) {
        self.transform.add_clip(local);
    }

    pub fn clip_region_visible(&self) -> bool {
        self.transform.clip_visible()
    }

    /// Push the current clip region to the backend.
    pub fn start_clip(&mut self) {
        let clip = self.transform.scaled_clip();
        self.renderer.borrow_mut().start_clip(clip);
    }

    pub fn end_clip(&mut self) {
        self.renderer.borrow_mut().end_clip();
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.transform.apply(rect);
        self.renderer.borrow_mut().draw_filled_rect(rect, color);
    }

    pub fn outline_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.transform.apply(rect);
        self.renderer.borrow_mut().draw_lined_rect(rect, color);
    }

    pub fn draw_texture(&mut self, texture: &Texture, rect: Rect, uv: [f32; 4], color: Color) {
        let rect = self.transform.apply(rect);
        self.renderer
            .borrow_mut()
            .draw_textured_rect(texture, rect, uv, color);
    }

    pub fn draw_text(&mut self, font: &Font, pos: Vec2, text: &str, color: Color) {
        if text.is_empty() {
            return;
        }
        let pos = self.transform.apply_point(pos);
        let scale = self.transform.scale();
        if scale == 1.0 {
            self.renderer.borrow_mut().render_text(font, pos, text, color);
        } else {
            let scaled = Font::new(font.face.clone(), font.size * scale);
            self.renderer
                .borrow_mut()
                .render_text(&scaled, pos, text, color);
        }
    }

    /// Unscaled text extent.
    pub fn measure_text(&self, font: &Font, text: &str) -> Size {
        self.renderer.borrow().measure_text(font, text)
    }

    pub fn supports_cache_to_texture(&self) -> bool {
        self.renderer.borrow().supports_cache_to_texture()
    }

    /// Redirect drawing into the surface for `key`. Ignored, with a warning,
    /// when the renderer has no cache support.
    pub fn setup_cache_texture(&mut self, key: CacheKey, size: Size) {
        if !self.supports_cache_to_texture() {
            tracing::warn!(?key, "cache surface requested from a renderer without cache support");
            return;
        }
        let scale = self.transform.scale();
        let size = Size::new(size.width * scale, size.height * scale);
        tracing::trace!(?key, width = size.width, height = size.height, "cache surface setup");
        self.renderer.borrow_mut().setup_cache_texture(key, size);
    }

    pub fn finish_cache_texture(&mut self, key: CacheKey) {
        tracing::trace!(?key, "cache surface finished");
        self.renderer.borrow_mut().finish_cache_texture(key);
    }

    /// Composite a cached surface at `local`.
    pub fn draw_cached_texture(&mut self, key: CacheKey, local: Rect) {
        let dest = self.transform.apply(local);
        self.renderer.borrow_mut().draw_cached_texture(key, dest);
    }

    pub fn release_cache_texture(&mut self, key: CacheKey) {
        tracing::debug!(?key, "cache surface released");
        self.renderer.borrow_mut().release_cache_texture(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Renderer;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Surfaces {
        cache: bool,
        setups: Vec<(CacheKey, Size)>,
    }

    impl Renderer for Surfaces {
        fn start_clip(&mut self, _clip: Rect) {}

        fn end_clip(&mut self) {}

        fn draw_filled_rect(&mut self, _rect: Rect, _color: Color) {}

        fn draw_textured_rect(&mut self, _texture: &Texture, _rect: Rect, _uv: [f32; 4], _color: Color) {}

        fn render_text(&mut self, _font: &Font, _pos: Vec2, _text: &str, _color: Color) {}

        fn measure_text(&self, _font: &Font, _text: &str) -> Size {
            Size::new(0.0, 0.0)
        }

        fn supports_cache_to_texture(&self) -> bool {
            self.cache
        }

        fn setup_cache_texture(&mut self, key: CacheKey, size: Size) {
            self.setups.push((key, size));
        }
    }

    #[test]
    fn test_cache_setup_is_scaled() {
        let surfaces = Rc::new(RefCell::new(Surfaces {
            cache: true,
            ..Default::default()
        }));
        let mut painter = Painter::new(surfaces.clone(), Rect::new(0.0, 0.0, 100.0, 100.0), 2.0);
        painter.setup_cache_texture(CacheKey(3), Size::new(10.0, 5.0));
        assert_eq!(surfaces.borrow().setups, vec![(CacheKey(3), Size::new(20.0, 10.0))]);
    }

    #[test]
    fn test_cache_setup_skipped_without_support() {
        let surfaces = Rc::new(RefCell::new(Surfaces::default()));
        let mut painter = Painter::new(surfaces.clone(), Rect::new(0.0, 0.0, 100.0, 100.0), 1.0);
        painter.setup_cache_texture(CacheKey(1), Size::new(10.0, 10.0));
        assert!(surfaces.borrow().setups.is_empty());
    }
}
