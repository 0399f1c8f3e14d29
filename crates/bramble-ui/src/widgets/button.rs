use crate::behavior::Behavior;
use crate::canvas::Canvas;
use crate::control::ControlId;
use crate::drag_drop::Package;
use crate::event::EventKind;
use crate::input::MouseButton;
use crate::render::{ButtonLook, Skin};
use crate::widgets::Label;
use bramble_core::math::Vec2;
use bramble_core::{Padding, Pos, Size};
use bramble_render::Painter;
use std::cell::Cell;

/// Package tag used by [`Button::set_draggable`].
pub const BUTTON_PACKAGE: &str = "button";

/// A clickable label.
///
/// Fires [`EventKind::Pressed`] on press, [`EventKind::Released`] on
/// release and [`EventKind::Clicked`] when the release happens over the
/// button. In toggle mode a click also flips the toggle state.
#[derive(Debug)]
pub struct Button {
    label: Label,
    depressed: Cell<bool>,
    toggle: Cell<bool>,
    toggled: Cell<bool>,
}

impl Button {
    pub fn new() -> Self {
        Self {
            label: Label::with_alignment(Pos::CENTER),
            depressed: Cell::new(false),
            toggle: Cell::new(false),
            toggled: Cell::new(false),
        }
    }

    pub fn create(cx: &mut Canvas, parent: Option<ControlId>, text: &str) -> ControlId {
        let id = cx.create(parent, Button::new());
        cx.set_size(id, Size::new(100.0, 20.0));
        cx.set_tabable(id, true);
        cx.set_keyboard_input_enabled(id, true);
        Label::set_text_padding(cx, id, Padding::all(3.0));
        Label::set_text(cx, id, text);
        id
    }

    pub(crate) fn label(&self) -> &Label {
        &self.label
    }

    fn get(cx: &Canvas, id: ControlId) -> Option<&Button> {
        cx.control(id)?.behavior::<Button>()
    }

    pub fn is_depressed(cx: &Canvas, id: ControlId) -> bool {
        Self::get(cx, id).is_some_and(|b| b.depressed.get())
    }

    pub fn is_toggle(cx: &Canvas, id: ControlId) -> bool {
        Self::get(cx, id).is_some_and(|b| b.toggle.get())
    }

    pub fn set_is_toggle(cx: &mut Canvas, id: ControlId, toggle: bool) {
        if let Some(button) = Self::get(cx, id) {
            button.toggle.set(toggle);
        }
    }

    pub fn toggle_state(cx: &Canvas, id: ControlId) -> bool {
        Self::get(cx, id).is_some_and(|b| b.toggled.get())
    }

    /// Set the toggle state, firing `Toggled` and then `ToggledOn` or
    /// `ToggledOff` when it changes.
    pub fn set_toggle_state(cx: &mut Canvas, id: ControlId, on: bool) {
        let Some(button) = Self::get(cx, id) else {
            return;
        };
        if button.toggled.replace(on) == on {
            return;
        }
        cx.emit(id, EventKind::Toggled);
        cx.emit(id, if on { EventKind::ToggledOn } else { EventKind::ToggledOff });
        cx.redraw(id);
    }

    /// Let the button be dragged with a package tagged [`BUTTON_PACKAGE`].
    pub fn set_draggable(cx: &mut Canvas, id: ControlId, draggable: bool) {
        let package = draggable.then(|| Package::new(BUTTON_PACKAGE));
        cx.set_drag_package(id, package);
    }

    /// Activate the button as if it was clicked.
    pub fn press(cx: &mut Canvas, id: ControlId) {
        if Self::is_toggle(cx, id) {
            let on = !Self::toggle_state(cx, id);
            Self::set_toggle_state(cx, id, on);
        }
        cx.emit(id, EventKind::Clicked);
    }

    fn look(&self, cx: &Canvas, id: ControlId) -> ButtonLook {
        ButtonLook {
            depressed: self.depressed.get(),
            hovered: cx.is_hovered(id),
            disabled: cx.is_disabled(id),
            toggled: self.toggled.get(),
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for Button {
    fn layout(&self, cx: &mut Canvas, id: ControlId) {
        self.label.layout_text(cx, id);
    }

    fn render(&self, cx: &Canvas, id: ControlId, skin: &dyn Skin, painter: &mut Painter) {
        let look = self.look(cx, id);
        let bounds = cx.control(id).map(|c| c.render_bounds()).unwrap_or_default();
        skin.draw_button(painter, bounds, look);
        self.label.draw_text(cx, id, painter, skin.button_text_color(look));
    }

    fn on_mouse_clicked(&self, cx: &mut Canvas, id: ControlId, button: MouseButton, _pos: Vec2, down: bool) {
        if cx.is_disabled(id) {
            return;
        }
        match button {
            MouseButton::Left => {
                if down {
                    self.depressed.set(true);
                    cx.capture_mouse(id);
                    cx.emit(id, EventKind::Pressed);
                } else {
                    if cx.is_mouse_over(id) && self.depressed.get() {
                        Button::press(cx, id);
                    }
                    self.depressed.set(false);
                    cx.release_mouse(id);
                    cx.emit(id, EventKind::Released);
                }
                cx.redraw(id);
            }
            MouseButton::Right if !down => cx.emit(id, EventKind::RightClicked),
            _ => {}
        }
    }

    fn on_mouse_double_clicked(&self, cx: &mut Canvas, id: ControlId, button: MouseButton, _pos: Vec2) {
        if button == MouseButton::Left && !cx.is_disabled(id) {
            cx.emit(id, EventKind::DoubleClicked);
        }
    }

    fn on_lost_mouse_focus(&self, cx: &mut Canvas, id: ControlId) {
        if self.depressed.replace(false) {
            cx.redraw(id);
        }
    }

    fn on_key_space(&self, cx: &mut Canvas, id: ControlId, down: bool) -> bool {
        if down && !cx.is_disabled(id) {
            Button::press(cx, id);
        }
        true
    }
}
