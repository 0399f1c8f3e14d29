//! Input routing.
//!
//! Platform events enter through the `input_*` methods on [`Canvas`]. Mouse
//! events go to the hovered control, or to the control holding mouse
//! capture. Key events go to the control with keyboard focus and bubble up
//! the logical parents until handled. Printable characters are offered to
//! accelerators first.

mod accelerator;
mod keys;

pub use accelerator::normalize_accelerator;
pub use keys::{Key, Modifiers, MouseButton};

use crate::canvas::Canvas;
use crate::control::ControlId;
use crate::event::EventKind;
use bramble_core::math::{Vec2, manhattan};
use bramble_core::profiling::profile_function;

/// Router state owned by a canvas.
#[derive(Debug, Default)]
pub(crate) struct InputState {
    pub(crate) hovered: Option<ControlId>,
    pub(crate) mouse_focus: Option<ControlId>,
    pub(crate) keyboard_focus: Option<ControlId>,
    pub(crate) mouse_position: Vec2,
    pub(crate) mouse_down: [bool; 3],
    /// Time of the last press per button that could start a double click.
    pub(crate) last_click_time: [Option<f64>; 3],
    pub(crate) last_click_pos: [Vec2; 3],
    pub(crate) key_state: [bool; Key::ALL.len()],
    pub(crate) next_repeat: [f64; Key::ALL.len()],
    /// Control each held key was pressed on. Repeats go here, and a key
    /// stops repeating once focus leaves it.
    pub(crate) repeat_target: [Option<ControlId>; Key::ALL.len()],
}

impl Canvas {
    /// Feed a mouse move, in window pixels. Returns true when a control other
    /// than the root is under the cursor.
    pub fn input_mouse_moved(&mut self, x: f32, y: f32, dx: f32, dy: f32) -> bool {
        profile_function!();
        let root = self.root();
        if self.is_hidden(root) {
            return false;
        }
        let scale = self.config.scale;
        let pos = Vec2::new(x, y) / scale;
        let delta = Vec2::new(dx, dy) / scale;
        self.input.mouse_position = pos;
        self.update_hovered();

        let hovered = self.input.hovered;
        let mut handled = false;
        if let Some(target) = hovered
            && target != root
            && let Some(behavior) = self.behavior(target)
        {
            behavior.on_mouse_moved(self, target, pos, delta);
            self.update_cursor();
            handled = true;
        }
        self.drag_mouse_moved(hovered, pos);
        handled
    }

    /// Feed a button press or release at the last known mouse position.
    pub fn input_mouse_button(&mut self, button: MouseButton, down: bool) -> bool {
        profile_function!();
        let root = self.root();
        if self.is_hidden(root) {
            return false;
        }
        // A carried package is dropped wherever the button comes up, even
        // over bare canvas.
        if button == MouseButton::Left && !down && self.is_dragging() {
            self.input.mouse_down[button.index()] = false;
            let hovered = self.input.hovered.unwrap_or(root);
            return self.drag_mouse_button(hovered, self.input.mouse_position, false);
        }
        let Some(target) = self.input.hovered.filter(|h| self.contains(*h)) else {
            return false;
        };
        if target == root || !self.is_visible(target) {
            return false;
        }

        let b = button.index();
        self.input.mouse_down[b] = down;
        let pos = self.input.mouse_position;

        let mut double_click = false;
        if down {
            let now = self.platform.time_seconds();
            double_click = self.input.last_click_time[b].is_some_and(|last| {
                now - last < self.config.double_click_time
                    && manhattan(pos, self.input.last_click_pos[b]) <= self.config.double_click_distance
            });
            if double_click {
                self.input.last_click_time[b] = None;
            } else {
                self.input.last_click_time[b] = Some(now);
                self.input.last_click_pos[b] = pos;
            }
            self.find_keyboard_focus(target);
        }

        self.update_cursor();
        if down {
            self.touch(target);
        }

        if button == MouseButton::Left && self.drag_mouse_button(target, pos, down) {
            return true;
        }

        let Some(behavior) = self.behavior(target) else {
            return true;
        };
        behavior.on_mouse_clicked(self, target, button, pos, down);
        if double_click && self.contains(target) {
            tracing::trace!(%target, ?button, "double click");
            behavior.on_mouse_double_clicked(self, target, button, pos);
        }
        true
    }

    pub fn input_mouse_wheel(&mut self, delta: f32) -> bool {
        let root = self.root();
        if self.is_hidden(root) {
            return false;
        }
        let Some(target) = self.input.hovered.filter(|h| self.contains(*h)) else {
            return false;
        };
        if target == root || !self.is_visible(target) {
            return false;
        }
        self.dispatch_mouse_wheel(target, delta)
    }

    /// Offer a wheel movement to `id`; unhandled wheel input continues up the
    /// actual parents.
    pub fn dispatch_mouse_wheel(&mut self, id: ControlId, delta: f32) -> bool {
        match self.behavior(id) {
            Some(behavior) => behavior.on_mouse_wheeled(self, id, delta),
            None => false,
        }
    }

    /// Feed a key transition. Repeated downs without an up in between are
    /// ignored; repeats are synthesised by the think pass.
    pub fn input_key(&mut self, key: Key, down: bool) -> bool {
        profile_function!();
        let root = self.root();
        if self.is_hidden(root) {
            return false;
        }
        let mut target = self.input.keyboard_focus.filter(|f| self.is_visible(*f));
        if target.is_none() && key == Key::Tab {
            target = Some(root);
        }

        let k = key.index();
        if down {
            if self.input.key_state[k] {
                return false;
            }
            self.input.key_state[k] = true;
            self.input.next_repeat[k] = self.platform.time_seconds() + self.config.key_repeat_delay;
            self.input.repeat_target[k] = target;
        } else {
            if !self.input.key_state[k] {
                return false;
            }
            self.input.key_state[k] = false;
            self.input.repeat_target[k] = None;
        }
        match target {
            Some(target) => self.dispatch_key(target, key, down),
            None => false,
        }
    }

    /// Feed a typed character.
    pub fn input_character(&mut self, ch: char) -> bool {
        profile_function!();
        if self.is_hidden(self.root()) || ch.is_control() {
            return false;
        }
        if self.handle_accelerator(ch) {
            return true;
        }
        let Some(focus) = self.input.keyboard_focus.filter(|f| self.is_visible(*f)) else {
            return false;
        };
        let Some(behavior) = self.behavior(focus) else {
            return false;
        };
        if self.modifiers().contains(Modifiers::CTRL) {
            match ch.to_ascii_lowercase() {
                'c' => behavior.on_copy(self, focus),
                'x' => behavior.on_cut(self, focus),
                'v' => behavior.on_paste(self, focus),
                'a' => behavior.on_select_all(self, focus),
                _ => return false,
            }
            return true;
        }
        behavior.on_char(self, focus, ch)
    }

    /// Deliver a key to `id`, bubbling through logical parents until a
    /// control handles it.
    pub fn dispatch_key(&mut self, id: ControlId, key: Key, down: bool) -> bool {
        let mut current = Some(id);
        while let Some(target) = current {
            let Some(behavior) = self.behavior(target) else {
                return false;
            };
            if behavior.on_key_press(self, target, key, down) {
                return true;
            }
            current = self.parent(target);
        }
        false
    }

    fn update_hovered(&mut self) {
        let target = match self.input.mouse_focus.filter(|f| self.contains(*f)) {
            Some(capture) => Some(capture),
            None => self.control_at(self.input.mouse_position),
        };
        self.set_hovered(target);
    }

    /// Move the hover to `target`, firing leave on the old control before
    /// enter on the new one.
    pub(crate) fn set_hovered(&mut self, target: Option<ControlId>) {
        let old = self.input.hovered;
        if old == target {
            return;
        }
        self.input.hovered = None;
        if let Some(old) = old
            && let Some(behavior) = self.behavior(old)
        {
            tracing::trace!(control = %old, "hover leave");
            behavior.on_mouse_leave(self, old);
            self.emit(old, EventKind::HoverLeave);
        }
        self.input.hovered = target;
        if let Some(new) = target
            && let Some(behavior) = self.behavior(new)
        {
            tracing::trace!(control = %new, "hover enter");
            behavior.on_mouse_enter(self, new);
            self.emit(new, EventKind::HoverEnter);
        }
        self.update_tooltip_owner();
        self.update_cursor();
    }

    fn update_cursor(&mut self) {
        if let Some(cursor) = self.input.hovered.and_then(|h| self.control(h)).map(|c| c.cursor) {
            self.platform.set_cursor(cursor);
        }
    }

    /// Give keyboard focus to the first keyboard-enabled control at or above
    /// `id`, unless focus already sits on it or inside it.
    fn find_keyboard_focus(&mut self, id: ControlId) {
        let mut current = Some(id);
        while let Some(c) = current {
            let Some(control) = self.control(c) else {
                return;
            };
            if control.keyboard_input {
                if let Some(focus) = self.input.keyboard_focus
                    && (focus == c || self.is_descendant_of(focus, c))
                {
                    return;
                }
                self.focus(c);
                return;
            }
            current = control.parent;
        }
    }

    /// Give `id` keyboard focus.
    pub fn focus(&mut self, id: ControlId) {
        if !self.contains(id) {
            tracing::warn!(%id, "cannot focus a disposed control");
            return;
        }
        if self.input.keyboard_focus == Some(id) {
            return;
        }
        if let Some(old) = self.input.keyboard_focus.take() {
            self.lose_keyboard_focus(old);
        }
        tracing::debug!(%id, "keyboard focus");
        self.input.keyboard_focus = Some(id);
        if let Some(behavior) = self.behavior(id) {
            behavior.on_keyboard_focus(self, id);
        }
        self.emit(id, EventKind::FocusGained);
        self.redraw(id);
    }

    /// Drop keyboard focus if `id` holds it.
    pub fn blur(&mut self, id: ControlId) {
        if self.input.keyboard_focus != Some(id) {
            return;
        }
        self.input.keyboard_focus = None;
        self.lose_keyboard_focus(id);
    }

    fn lose_keyboard_focus(&mut self, id: ControlId) {
        if let Some(behavior) = self.behavior(id) {
            behavior.on_lost_keyboard_focus(self, id);
        }
        self.emit(id, EventKind::FocusLost);
        self.redraw(id);
    }

    /// Route all mouse input to `id` until released.
    pub fn capture_mouse(&mut self, id: ControlId) {
        if !self.contains(id) || self.input.mouse_focus == Some(id) {
            return;
        }
        let old = self.input.mouse_focus.replace(id);
        if let Some(old) = old
            && let Some(behavior) = self.behavior(old)
        {
            behavior.on_lost_mouse_focus(self, old);
        }
    }

    /// End a capture held by `id`.
    pub fn release_mouse(&mut self, id: ControlId) {
        if self.input.mouse_focus == Some(id) {
            self.input.mouse_focus = None;
        }
    }

    /// Take mouse capture away from whoever holds it.
    pub fn clear_mouse_focus(&mut self) {
        if let Some(old) = self.input.mouse_focus.take()
            && let Some(behavior) = self.behavior(old)
        {
            behavior.on_lost_mouse_focus(self, old);
        }
    }

    pub fn hovered(&self) -> Option<ControlId> {
        self.input.hovered
    }

    pub fn mouse_focus(&self) -> Option<ControlId> {
        self.input.mouse_focus
    }

    pub fn keyboard_focus(&self) -> Option<ControlId> {
        self.input.keyboard_focus
    }

    /// Last mouse position in canvas coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.input.mouse_position
    }

    pub fn modifiers(&self) -> Modifiers {
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::SHIFT, self.is_key_down(Key::Shift));
        modifiers.set(Modifiers::CTRL, self.is_key_down(Key::Control));
        modifiers.set(Modifiers::ALT, self.is_key_down(Key::Alt));
        modifiers
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.input.key_state[key.index()]
    }

    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.input.mouse_down[button.index()]
    }

    pub fn is_hovered(&self, id: ControlId) -> bool {
        self.input.hovered == Some(id)
    }

    /// True when the cursor is over `id` or one of its descendants,
    /// regardless of capture.
    pub fn is_mouse_over(&self, id: ControlId) -> bool {
        self.control_at(self.input.mouse_position)
            .is_some_and(|hit| hit == id || self.is_descendant_of(hit, id))
    }

    /// Input upkeep run at the end of every think pass.
    pub(crate) fn on_canvas_think(&mut self) {
        if let Some(capture) = self.input.mouse_focus
            && !self.is_visible(capture)
        {
            self.clear_mouse_focus();
        }
        if let Some(hovered) = self.input.hovered
            && !self.is_visible(hovered)
        {
            self.set_hovered(None);
        }
        if let Some(focus) = self.input.keyboard_focus
            && (!self.is_visible(focus) || self.control(focus).is_none_or(|c| !c.keyboard_input))
        {
            self.blur(focus);
        }

        let Some(focus) = self.input.keyboard_focus else {
            return;
        };
        let now = self.platform.time_seconds();
        for key in Key::ALL {
            let k = key.index();
            if key.is_modifier() || !self.input.key_state[k] {
                continue;
            }
            if self.input.repeat_target[k] != Some(focus) {
                // Still held, but focus moved since the press.
                self.input.repeat_target[k] = None;
                continue;
            }
            if now > self.input.next_repeat[k] {
                self.input.next_repeat[k] = now + self.config.key_repeat_rate;
                self.dispatch_key(focus, key, true);
            }
        }
    }
}
