//! Bounds, spacing, visibility, invalidation and coordinate conversion.

use super::Canvas;
use crate::control::ControlId;
use crate::dirty::DirtyFlags;
use crate::event::EventKind;
use bramble_core::math::Vec2;
use bramble_core::{Margin, Padding, Pos, Rect, Size};

impl Canvas {
    /// Set position and size relative to the actual parent. The size is
    /// clamped to the control's min/max size. Returns false when nothing
    /// changed.
    pub fn set_bounds(&mut self, id: ControlId, bounds: Rect) -> bool {
        let Some(control) = self.live_mut(id, "set_bounds") else {
            return false;
        };
        let width = bounds.width.max(control.min_size.width).min(control.max_size.width);
        let height = bounds.height.max(control.min_size.height).min(control.max_size.height);
        let bounds = Rect::new(bounds.x, bounds.y, width, height);
        if control.bounds == bounds {
            return false;
        }
        let old = control.bounds;
        control.bounds = bounds;
        control.render_bounds = Rect::from_size(bounds.size());
        self.on_bounds_changed(id, old);
        true
    }

    fn on_bounds_changed(&mut self, id: ControlId, old: Rect) {
        let Some(control) = self.control(id) else {
            return;
        };
        let new = control.bounds;
        if let Some(parent) = control.parent
            && let Some(behavior) = self.behavior(parent)
        {
            behavior.on_child_bounds_changed(self, parent, id, old);
        }
        if new.size() != old.size() {
            self.invalidate(id);
        }
        self.redraw(id);
        if let Some(behavior) = self.behavior(id) {
            behavior.on_bounds_changed(self, id, old);
        }
        self.emit(id, EventKind::BoundsChanged);
    }

    /// Move to `pos`, clamped inside the parent when the control is
    /// restricted to it.
    pub fn move_to(&mut self, id: ControlId, pos: Vec2) -> bool {
        let Some(control) = self.control(id) else {
            return false;
        };
        let mut pos = pos;
        if control.restrict_to_parent
            && let Some(parent) = control.actual_parent.and_then(|p| self.control(p))
        {
            let area = parent.render_bounds.shrink(parent.padding);
            let max_x = (area.right() - control.bounds.width).max(area.x);
            let max_y = (area.bottom() - control.bounds.height).max(area.y);
            pos.x = pos.x.clamp(area.x, max_x);
            pos.y = pos.y.clamp(area.y, max_y);
        }
        let size = control.bounds.size();
        self.set_bounds(id, Rect::new(pos.x, pos.y, size.width, size.height))
    }

    pub fn set_size(&mut self, id: ControlId, size: Size) -> bool {
        let Some(control) = self.control(id) else {
            return false;
        };
        let origin = control.bounds.origin();
        self.set_bounds(id, Rect::new(origin.x, origin.y, size.width, size.height))
    }

    pub fn set_min_size(&mut self, id: ControlId, size: Size) {
        let Some(control) = self.live_mut(id, "set_min_size") else {
            return;
        };
        control.min_size = size;
        let bounds = control.bounds;
        self.set_bounds(id, bounds);
    }

    pub fn set_max_size(&mut self, id: ControlId, size: Size) {
        let Some(control) = self.live_mut(id, "set_max_size") else {
            return;
        };
        control.max_size = size;
        let bounds = control.bounds;
        self.set_bounds(id, bounds);
    }

    pub fn set_margin(&mut self, id: ControlId, margin: Margin) {
        let Some(control) = self.live_mut(id, "set_margin") else {
            return;
        };
        if control.margin == margin {
            return;
        }
        control.margin = margin;
        self.invalidate(id);
        self.invalidate_parent(id);
    }

    pub fn set_padding(&mut self, id: ControlId, padding: Padding) {
        let Some(control) = self.live_mut(id, "set_padding") else {
            return;
        };
        if control.padding == padding {
            return;
        }
        control.padding = padding;
        self.invalidate(id);
        self.invalidate_parent(id);
    }

    pub fn set_dock(&mut self, id: ControlId, dock: Pos) {
        let Some(control) = self.live_mut(id, "set_dock") else {
            return;
        };
        if control.dock == dock {
            return;
        }
        control.dock = dock;
        self.invalidate(id);
        self.invalidate_parent(id);
    }

    pub fn set_hidden(&mut self, id: ControlId, hidden: bool) {
        let Some(control) = self.live_mut(id, "set_hidden") else {
            return;
        };
        if control.hidden == hidden {
            return;
        }
        control.hidden = hidden;
        self.invalidate(id);
        self.redraw(id);
    }

    pub fn set_disabled(&mut self, id: ControlId, disabled: bool) {
        let Some(control) = self.live_mut(id, "set_disabled") else {
            return;
        };
        if control.disabled == disabled {
            return;
        }
        control.disabled = disabled;
        self.redraw(id);
    }

    /// Request a layout and a re-render of `id` only.
    pub fn invalidate(&mut self, id: ControlId) {
        if let Some(control) = self.control_mut(id) {
            control.dirty |= DirtyFlags::ALL;
        }
    }

    /// Invalidate the control that lays `id` out.
    pub fn invalidate_parent(&mut self, id: ControlId) {
        if let Some(parent) = self.control(id).and_then(|c| c.actual_parent) {
            self.invalidate(parent);
        }
    }

    /// Mark `id` and every ancestor as needing a re-render without touching
    /// layout.
    pub fn redraw(&mut self, id: ControlId) {
        let mut current = Some(id);
        while let Some(c) = current {
            let Some(control) = self.control_mut(c) else {
                return;
            };
            control.dirty |= DirtyFlags::CACHE;
            current = control.actual_parent;
        }
    }

    /// Hidden flag of `id` alone.
    pub fn is_hidden(&self, id: ControlId) -> bool {
        self.control(id).is_none_or(|c| c.hidden)
    }

    /// True when `id` and all its ancestors are shown and the chain reaches
    /// the canvas root.
    pub fn is_visible(&self, id: ControlId) -> bool {
        let mut current = id;
        loop {
            let Some(control) = self.control(current) else {
                return false;
            };
            if control.hidden {
                return false;
            }
            match control.actual_parent {
                Some(parent) => current = parent,
                None => return current == self.root(),
            }
        }
    }

    pub fn is_disabled(&self, id: ControlId) -> bool {
        self.control(id).is_some_and(|c| c.disabled)
    }

    /// Convert a point local to `id` into canvas coordinates.
    ///
    /// Walks the actual parent chain, so the offset of an inner panel
    /// between a control and its logical parent is included.
    pub fn local_to_canvas(&self, id: ControlId, local: Vec2) -> Vec2 {
        let mut pos = local;
        let mut current = Some(id);
        while let Some(c) = current {
            let Some(control) = self.control(c) else {
                break;
            };
            if control.actual_parent.is_none() {
                break;
            }
            pos += control.bounds.origin();
            current = control.actual_parent;
        }
        pos
    }

    pub fn canvas_to_local(&self, id: ControlId, canvas: Vec2) -> Vec2 {
        canvas - self.local_to_canvas(id, Vec2::ZERO)
    }

    /// Topmost mouse-enabled control at a canvas position.
    pub fn control_at(&self, pos: Vec2) -> Option<ControlId> {
        self.control_at_local(self.root(), pos)
    }

    /// Topmost mouse-enabled control at `pos`, local to `id`. Children are
    /// tested front to back; `id` itself is the fallback.
    pub fn control_at_local(&self, id: ControlId, pos: Vec2) -> Option<ControlId> {
        let control = self.control(id)?;
        if control.hidden || !control.render_bounds.contains(pos) {
            return None;
        }
        for &child in control.children.iter().rev() {
            let Some(origin) = self.control(child).map(|c| c.bounds.origin()) else {
                continue;
            };
            if let Some(found) = self.control_at_local(child, pos - origin) {
                return Some(found);
            }
        }
        control.mouse_input.then_some(id)
    }

    /// Extent of the visible children that count towards size, margins
    /// included.
    pub fn child_extent(&self, id: ControlId) -> Size {
        let Some(control) = self.control(id) else {
            return Size::ZERO;
        };
        control
            .children
            .iter()
            .filter_map(|c| self.control(*c))
            .filter(|c| !c.hidden && c.include_in_size)
            .fold(Size::ZERO, |size, c| Size::new(size.width.max(c.right()), size.height.max(c.bottom())))
    }

    /// Grow or shrink to fit the children along the chosen axes.
    pub fn size_to_children(&mut self, id: ControlId, width: bool, height: bool) -> bool {
        let Some(control) = self.control(id) else {
            return false;
        };
        let extent = self.child_extent(id);
        let size = Size::new(
            if width { extent.width + control.padding.right } else { control.bounds.width },
            if height { extent.height + control.padding.bottom } else { control.bounds.height },
        );
        self.set_size(id, size)
    }

    /// Tell the logical ancestors that `id` was pressed.
    pub fn touch(&mut self, id: ControlId) {
        if let Some(parent) = self.parent(id)
            && let Some(behavior) = self.behavior(parent)
        {
            behavior.on_child_touched(self, parent, id);
        }
    }
}
