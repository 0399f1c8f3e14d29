//! The per-frame render pipeline.
//!
//! Controls are drawn back to front. Each one either draws straight to the
//! backend or, when it caches to texture and the renderer supports it, into
//! an offscreen surface that is only redrawn while something in its subtree
//! is marked dirty. Both paths produce the same picture.

mod skin;

pub use skin::{ButtonLook, SimpleSkin, Skin};

use crate::canvas::Canvas;
use crate::control::ControlId;
use crate::dirty::DirtyFlags;
use crate::error::UiError;
use bramble_core::math::Vec2;
use bramble_core::profiling::{self, profile_function, profile_scope};
use bramble_core::Rect;
use bramble_render::Painter;
use std::rc::Rc;

impl Canvas {
    /// Think, lay out and draw one frame.
    pub fn render_canvas(&mut self) -> Result<(), UiError> {
        profile_function!();
        profiling::new_frame();
        self.do_think();

        let area = Rect::from_size(self.size());
        let mut painter = Painter::new(self.renderer.clone(), area, self.config.scale);

        self.renderer.borrow_mut().begin();
        for key in std::mem::take(&mut self.released_caches) {
            painter.release_cache_texture(key);
        }
        painter.start_clip();
        if let Some(background) = self.config.background {
            painter.fill_rect(area, background);
        }

        let result = self.render_frame(&mut painter);

        painter.end_clip();
        self.renderer.borrow_mut().end();
        result
    }

    fn render_frame(&mut self, painter: &mut Painter) -> Result<(), UiError> {
        let root = self.root();
        if self.is_hidden(root) {
            return Ok(());
        }
        self.do_render(root, painter, false)?;
        self.render_drag_overlay(painter)?;
        self.render_tooltip(painter)?;
        Ok(())
    }

    /// Draw `id` with its top-left corner at `at` in canvas coordinates,
    /// independently of where it sits in the tree.
    pub(crate) fn render_at(&mut self, id: ControlId, painter: &mut Painter, at: Vec2) -> Result<(), UiError> {
        let Some(origin) = self.control(id).map(|c| c.bounds.origin()) else {
            return Ok(());
        };
        let old_offset = painter.offset();
        let old_clip = painter.clip_region();
        painter.set_offset(at - origin);
        painter.set_clip_region(Rect::from_size(self.size()));
        let result = self.do_render(id, painter, false);
        painter.set_offset(old_offset);
        painter.set_clip_region(old_clip);
        painter.start_clip();
        result
    }

    fn do_render(&mut self, id: ControlId, painter: &mut Painter, into_cache: bool) -> Result<(), UiError> {
        let Some(skin) = self.skin_for(id) else {
            tracing::error!(control = %id, "no skin assigned to the control or any ancestor");
            return Err(UiError::MissingSkin { control: id });
        };
        let Some(control) = self.control(id) else {
            return Ok(());
        };
        if control.needs_layout() {
            self.recurse_layout(id);
        }

        let cached = !into_cache
            && self.control(id).is_some_and(|c| c.cache_to_texture)
            && painter.supports_cache_to_texture();
        if cached {
            self.render_cached(id, painter, &skin)
        } else {
            self.render_recursive(id, painter, &skin, into_cache)
        }
    }

    fn render_recursive(
        &mut self,
        id: ControlId,
        painter: &mut Painter,
        skin: &Rc<dyn Skin>,
        into_cache: bool,
    ) -> Result<(), UiError> {
        let Some(control) = self.control_mut(id) else {
            return Ok(());
        };
        control.dirty.remove(DirtyFlags::CACHE);
        let origin = control.bounds.origin();
        let render_bounds = control.render_bounds;
        let Some(behavior) = self.behavior(id) else {
            return Ok(());
        };

        let old_offset = painter.offset();
        let old_clip = painter.clip_region();
        painter.add_offset(origin);

        behavior.render_under(self, id, skin.as_ref(), painter);

        painter.add_clip_region(render_bounds);
        if !painter.clip_region_visible() {
            painter.set_offset(old_offset);
            painter.set_clip_region(old_clip);
            return Ok(());
        }
        painter.start_clip();

        behavior.render(self, id, skin.as_ref(), painter);

        let children = self.control(id).map(|c| c.children.clone()).unwrap_or_default();
        for child in children {
            let shown = self
                .control(child)
                .is_some_and(|c| !c.hidden && c.actual_parent == Some(id));
            if shown {
                self.do_render(child, painter, into_cache)?;
            }
        }

        painter.set_clip_region(old_clip);
        painter.start_clip();

        behavior.render_over(self, id, skin.as_ref(), painter);
        behavior.render_focus(self, id, skin.as_ref(), painter);

        painter.set_offset(old_offset);
        Ok(())
    }

    /// Composite the cached surface of `master`, redrawing it first when its
    /// subtree changed.
    fn render_cached(&mut self, master: ControlId, painter: &mut Painter, skin: &Rc<dyn Skin>) -> Result<(), UiError> {
        profile_scope!("render_cached");
        let Some(control) = self.control(master) else {
            return Ok(());
        };
        let bounds = control.bounds;
        let render_bounds = control.render_bounds;

        let old_offset = painter.offset();
        let old_clip = painter.clip_region();
        painter.add_offset(bounds.origin());
        painter.add_clip_region(render_bounds);
        if !painter.clip_region_visible() {
            painter.set_offset(old_offset);
            painter.set_clip_region(old_clip);
            return Ok(());
        }

        let key = master.cache_key();
        if self.subtree_cache_dirty(master) {
            tracing::trace!(%master, "redrawing cached surface");
            painter.setup_cache_texture(key, bounds.size());
            painter.set_offset(-bounds.origin());
            painter.set_clip_region(Rect::from_size(bounds.size()));
            let result = self.render_recursive(master, painter, skin, true);
            painter.finish_cache_texture(key);
            result?;
            self.clear_subtree_cache(master);

            painter.set_offset(old_offset);
            painter.set_clip_region(old_clip);
            painter.add_offset(bounds.origin());
            painter.add_clip_region(render_bounds);
        }

        painter.start_clip();
        painter.draw_cached_texture(key, render_bounds);

        painter.set_offset(old_offset);
        painter.set_clip_region(old_clip);
        painter.start_clip();
        Ok(())
    }

    /// True when `id` or any shown descendant awaits a re-render.
    pub fn subtree_cache_dirty(&self, id: ControlId) -> bool {
        let Some(control) = self.control(id) else {
            return false;
        };
        control.cache_dirty()
            || control
                .children
                .iter()
                .filter(|c| !self.is_hidden(**c))
                .any(|c| self.subtree_cache_dirty(*c))
    }

    fn clear_subtree_cache(&mut self, id: ControlId) {
        let Some(control) = self.control_mut(id) else {
            return;
        };
        control.dirty.remove(DirtyFlags::CACHE);
        let children = control.children.clone();
        for child in children {
            self.clear_subtree_cache(child);
        }
    }
}
