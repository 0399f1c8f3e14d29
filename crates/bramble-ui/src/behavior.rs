//! Per-control behaviour.
//!
//! Every control carries one [`Behavior`]. The canvas calls its hooks while
//! laying out, rendering and routing input. All hooks have defaults, so a
//! widget only overrides what it needs; [`Panel`] overrides nothing.
//!
//! Hooks receive the canvas mutably and may change the tree freely,
//! including deleting the control they were called for. Use
//! [`Canvas::delayed_delete`] for that: the control stays readable until the
//! next think pass.

use crate::canvas::Canvas;
use crate::control::ControlId;
use crate::drag_drop::Package;
use crate::input::{Key, MouseButton};
use crate::render::Skin;
use bramble_core::Rect;
use bramble_core::math::Vec2;
use bramble_render::Painter;
use std::any::Any;

/// Keyboard highlight inset, in pixels from the control edge.
const FOCUS_HIGHLIGHT_INSET: f32 = 3.0;

pub trait Behavior: Any {
    /// Arrange the control's own content. Runs before docked children are
    /// placed, and only when the control was invalidated.
    fn layout(&self, _cx: &mut Canvas, _id: ControlId) {}

    /// Runs after every child has been placed and laid out.
    fn post_layout(&self, _cx: &mut Canvas, _id: ControlId) {}

    fn on_bounds_changed(&self, _cx: &mut Canvas, _id: ControlId, _old: Rect) {}

    fn on_child_bounds_changed(&self, _cx: &mut Canvas, _id: ControlId, _child: ControlId, _old: Rect) {}

    fn on_child_added(&self, cx: &mut Canvas, id: ControlId, _child: ControlId) {
        cx.invalidate(id);
    }

    fn on_child_removed(&self, cx: &mut Canvas, id: ControlId, _child: ControlId) {
        cx.invalidate(id);
    }

    /// A descendant was pressed. The default keeps bubbling the touch up.
    fn on_child_touched(&self, cx: &mut Canvas, id: ControlId, _child: ControlId) {
        cx.touch(id);
    }

    /// Drawn before the clip region is narrowed to the control.
    fn render_under(&self, _cx: &Canvas, _id: ControlId, _skin: &dyn Skin, _painter: &mut Painter) {}

    fn render(&self, _cx: &Canvas, _id: ControlId, _skin: &dyn Skin, _painter: &mut Painter) {}

    /// Drawn after the children, with the parent's clip region restored.
    fn render_over(&self, _cx: &Canvas, _id: ControlId, _skin: &dyn Skin, _painter: &mut Painter) {}

    fn render_focus(&self, cx: &Canvas, id: ControlId, skin: &dyn Skin, painter: &mut Painter) {
        if cx.keyboard_focus() != Some(id) {
            return;
        }
        let Some(control) = cx.control(id) else {
            return;
        };
        if !control.is_tabable() {
            return;
        }
        skin.draw_keyboard_highlight(painter, control.render_bounds(), FOCUS_HIGHLIGHT_INSET);
    }

    /// `pos` is in canvas coordinates.
    fn on_mouse_moved(&self, _cx: &mut Canvas, _id: ControlId, _pos: Vec2, _delta: Vec2) {}

    fn on_mouse_clicked(&self, _cx: &mut Canvas, _id: ControlId, _button: MouseButton, _pos: Vec2, _down: bool) {}

    /// Fired after the press that completed the double click was delivered
    /// through [`on_mouse_clicked`](Self::on_mouse_clicked).
    fn on_mouse_double_clicked(&self, _cx: &mut Canvas, _id: ControlId, _button: MouseButton, _pos: Vec2) {}

    /// Unhandled wheel input travels to the actual parent.
    fn on_mouse_wheeled(&self, cx: &mut Canvas, id: ControlId, delta: f32) -> bool {
        match cx.control(id).and_then(|c| c.actual_parent()) {
            Some(parent) => cx.dispatch_mouse_wheel(parent, delta),
            None => false,
        }
    }

    fn on_mouse_enter(&self, cx: &mut Canvas, id: ControlId) {
        cx.redraw(id);
    }

    fn on_mouse_leave(&self, cx: &mut Canvas, id: ControlId) {
        cx.redraw(id);
    }

    /// Mouse capture moved away from this control.
    fn on_lost_mouse_focus(&self, _cx: &mut Canvas, _id: ControlId) {}

    /// Returns true if the key was handled; unhandled keys bubble to the
    /// logical parent. The default fans out to the per-key hooks.
    fn on_key_press(&self, cx: &mut Canvas, id: ControlId, key: Key, down: bool) -> bool {
        match key {
            Key::Tab => self.on_key_tab(cx, id, down),
            Key::Space => self.on_key_space(cx, id, down),
            Key::Return => self.on_key_return(cx, id, down),
            Key::Backspace => self.on_key_backspace(cx, id, down),
            Key::Delete => self.on_key_delete(cx, id, down),
            Key::Left => self.on_key_left(cx, id, down),
            Key::Right => self.on_key_right(cx, id, down),
            Key::Up => self.on_key_up(cx, id, down),
            Key::Down => self.on_key_down(cx, id, down),
            Key::Home => self.on_key_home(cx, id, down),
            Key::End => self.on_key_end(cx, id, down),
            Key::Escape => self.on_key_escape(cx, id, down),
            Key::Shift | Key::Control | Key::Alt => false,
        }
    }

    /// Moves keyboard focus along the tab order computed by the last layout.
    fn on_key_tab(&self, cx: &mut Canvas, id: ControlId, down: bool) -> bool {
        if !down {
            return true;
        }
        if let Some(next) = cx.next_tab().or(cx.first_tab()) {
            cx.focus(next);
            cx.redraw(id);
        }
        true
    }

    fn on_key_space(&self, _cx: &mut Canvas, _id: ControlId, _down: bool) -> bool {
        false
    }

    fn on_key_return(&self, _cx: &mut Canvas, _id: ControlId, _down: bool) -> bool {
        false
    }

    fn on_key_backspace(&self, _cx: &mut Canvas, _id: ControlId, _down: bool) -> bool {
        false
    }

    fn on_key_delete(&self, _cx: &mut Canvas, _id: ControlId, _down: bool) -> bool {
        false
    }

    fn on_key_left(&self, _cx: &mut Canvas, _id: ControlId, _down: bool) -> bool {
        false
    }

    fn on_key_right(&self, _cx: &mut Canvas, _id: ControlId, _down: bool) -> bool {
        false
    }

    fn on_key_up(&self, _cx: &mut Canvas, _id: ControlId, _down: bool) -> bool {
        false
    }

    fn on_key_down(&self, _cx: &mut Canvas, _id: ControlId, _down: bool) -> bool {
        false
    }

    fn on_key_home(&self, _cx: &mut Canvas, _id: ControlId, _down: bool) -> bool {
        false
    }

    fn on_key_end(&self, _cx: &mut Canvas, _id: ControlId, _down: bool) -> bool {
        false
    }

    fn on_key_escape(&self, _cx: &mut Canvas, _id: ControlId, _down: bool) -> bool {
        false
    }

    fn on_char(&self, _cx: &mut Canvas, _id: ControlId, _ch: char) -> bool {
        false
    }

    fn on_keyboard_focus(&self, _cx: &mut Canvas, _id: ControlId) {}

    fn on_lost_keyboard_focus(&self, _cx: &mut Canvas, _id: ControlId) {}

    fn on_copy(&self, _cx: &mut Canvas, _id: ControlId) {}

    fn on_cut(&self, _cx: &mut Canvas, _id: ControlId) {}

    fn on_paste(&self, _cx: &mut Canvas, _id: ControlId) {}

    fn on_select_all(&self, _cx: &mut Canvas, _id: ControlId) {}

    /// The package offered when a drag starts on this control.
    fn drag_package(&self, cx: &mut Canvas, id: ControlId, _pos: Vec2) -> Option<Package> {
        cx.control(id)?.drag_package().cloned()
    }

    fn drag_is_draggable(&self, cx: &Canvas, id: ControlId) -> bool {
        cx.control(id)
            .and_then(|c| c.drag_package())
            .is_some_and(|p| p.draggable)
    }

    /// Last chance to refuse a drag once the pointer crossed the threshold.
    fn drag_should_start(&self, _cx: &mut Canvas, _id: ControlId) -> bool {
        true
    }

    fn drag_start(&self, cx: &mut Canvas, id: ControlId, package: &mut Package, pos: Vec2) {
        package.hold_offset = cx.canvas_to_local(id, pos);
        package.draw_control = Some(id);
    }

    fn drag_end(&self, _cx: &mut Canvas, _id: ControlId, _success: bool, _pos: Vec2) {}

    fn drag_can_accept(&self, _cx: &Canvas, _id: ControlId, _package: &Package) -> bool {
        false
    }

    /// The default moves the dragged control into this one.
    fn drag_handle_drop(&self, cx: &mut Canvas, id: ControlId, package: &Package, _pos: Vec2) -> bool {
        if let Some(source) = package.source {
            cx.set_parent(source, Some(id));
        }
        true
    }

    fn drag_hover_enter(&self, _cx: &mut Canvas, _id: ControlId, _package: &Package, _pos: Vec2) {}

    fn drag_hover_leave(&self, _cx: &mut Canvas, _id: ControlId, _package: &Package) {}

    fn drag_hover(&self, _cx: &mut Canvas, _id: ControlId, _package: &Package, _pos: Vec2) {}
}

/// A plain container with default behaviour.
#[derive(Debug, Default, Clone, Copy)]
pub struct Panel;

impl Behavior for Panel {}
