//! Drag and drop.
//!
//! Pressing the left button on a control with a draggable [`Package`]
//! arms a drag. Once the cursor travels past the configured threshold the
//! package is picked up, drop targets are offered it as the cursor moves,
//! and releasing the button drops it on the current target.

use crate::canvas::Canvas;
use crate::control::ControlId;
use crate::error::UiError;
use bramble_core::math::{Vec2, manhattan};
use bramble_core::platform::CursorShape;
use bramble_render::Painter;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// What is being dragged.
#[derive(Clone, Default)]
pub struct Package {
    /// Tag drop targets use to decide whether they accept the package.
    pub name: String,
    pub draggable: bool,
    pub user_data: Option<Rc<dyn Any>>,
    /// Where the control was grabbed, local to it.
    pub hold_offset: Vec2,
    /// Control drawn under the cursor while dragging.
    pub draw_control: Option<ControlId>,
    /// Control the drag started from.
    pub source: Option<ControlId>,
}

impl Package {
    /// A draggable package tagged `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            draggable: true,
            ..Default::default()
        }
    }

    pub fn with_user_data(mut self, data: impl Any) -> Self {
        self.user_data = Some(Rc::new(data));
        self
    }

    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_deref()?.downcast_ref()
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("name", &self.name)
            .field("draggable", &self.draggable)
            .field("has_user_data", &self.user_data.is_some())
            .field("hold_offset", &self.hold_offset)
            .field("draw_control", &self.draw_control)
            .field("source", &self.source)
            .finish()
    }
}

#[derive(Debug, Default)]
pub(crate) struct DragState {
    /// The package being carried.
    pub(crate) package: Option<Package>,
    pub(crate) source: Option<ControlId>,
    /// Drop target under the cursor.
    pub(crate) hovered: Option<ControlId>,
    /// Armed by a press on a draggable control.
    pub(crate) last_pressed: Option<ControlId>,
    pub(crate) last_pressed_pos: Vec2,
    pub(crate) mouse: Vec2,
}

impl Canvas {
    /// Attach the package offered when a drag starts on `id`.
    pub fn set_drag_package(&mut self, id: ControlId, package: Option<Package>) {
        if let Some(control) = self.live_mut(id, "set_drag_package") {
            control.drag_package = package;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.package.is_some()
    }

    pub fn drag_source(&self) -> Option<ControlId> {
        self.drag.source
    }

    /// The drop target currently under the cursor.
    pub fn drag_hovered(&self) -> Option<ControlId> {
        self.drag.hovered
    }

    pub fn current_drag_package(&self) -> Option<&Package> {
        self.drag.package.as_ref()
    }

    /// Pick up `package` from `source` without waiting for a press and
    /// threshold. `pos` is in canvas coordinates.
    pub fn start_drag(&mut self, source: ControlId, mut package: Package, pos: Vec2) -> bool {
        let Some(behavior) = self.behavior(source) else {
            tracing::warn!(%source, "cannot drag from a disposed control");
            return false;
        };
        package.source = Some(source);
        self.drag.last_pressed = None;
        self.drag.source = Some(source);
        behavior.drag_start(self, source, &mut package, pos);
        tracing::debug!(%source, package = %package.name, "drag started");
        self.drag.package = Some(package);
        true
    }

    /// Left button handling. Returns true when the event was consumed by a
    /// drop.
    pub(crate) fn drag_mouse_button(&mut self, hovered: ControlId, pos: Vec2, down: bool) -> bool {
        if !down {
            self.drag.last_pressed = None;
            if self.drag.package.is_none() {
                return false;
            }
            self.drag_drop(pos);
            return true;
        }
        let Some(behavior) = self.behavior(hovered) else {
            return false;
        };
        if !behavior.drag_is_draggable(self, hovered) {
            return false;
        }
        self.drag.last_pressed = Some(hovered);
        self.drag.last_pressed_pos = pos;
        false
    }

    pub(crate) fn drag_mouse_moved(&mut self, hovered: Option<ControlId>, pos: Vec2) {
        self.drag.mouse = pos;
        if self.drag.package.is_none() && !self.should_start_drag(pos) {
            return;
        }
        self.drag_update_hovered(hovered, pos);

        let Some(target) = self.drag.hovered else {
            return;
        };
        let (Some(package), Some(behavior)) = (self.drag.package.clone(), self.behavior(target)) else {
            return;
        };
        behavior.drag_hover(self, target, &package, pos);
        self.platform.set_cursor(CursorShape::Arrow);
        if let Some(hovered) = hovered {
            self.redraw(hovered);
        }
    }

    /// Turn an armed press into a drag once the cursor moved far enough.
    fn should_start_drag(&mut self, pos: Vec2) -> bool {
        let Some(pressed) = self.drag.last_pressed else {
            return false;
        };
        let pressed_pos = self.drag.last_pressed_pos;
        if manhattan(pos, pressed_pos) < self.config.drag_threshold {
            return false;
        }
        self.drag.last_pressed = None;
        let Some(behavior) = self.behavior(pressed) else {
            return false;
        };
        let Some(mut package) = behavior.drag_package(self, pressed, pressed_pos) else {
            self.drag.source = None;
            return false;
        };

        self.drag.source = Some(pressed);
        self.clear_mouse_focus();
        package.draw_control = None;
        package.source = Some(pressed);

        if !behavior.drag_should_start(self, pressed) {
            self.drag.source = None;
            return false;
        }
        behavior.drag_start(self, pressed, &mut package, pressed_pos);
        tracing::debug!(source = %pressed, package = %package.name, "drag started");
        self.drag.package = Some(package);
        true
    }

    /// Find the drop target for the control under the cursor: the nearest
    /// control at or above it that accepts the package.
    fn drag_update_hovered(&mut self, hovered: Option<ControlId>, pos: Vec2) {
        let Some(package) = self.drag.package.clone() else {
            return;
        };
        let source = self.drag.source;
        let mut target = hovered.filter(|h| Some(*h) != source);
        let mut refused = false;
        while let Some(t) = target {
            let accepts = Some(t) != source
                && self
                    .behavior(t)
                    .is_some_and(|b| b.drag_can_accept(self, t, &package));
            if accepts {
                break;
            }
            target = self.parent(t);
            refused = target.is_none();
        }
        if refused {
            self.platform.set_cursor(CursorShape::No);
        }

        if target == self.drag.hovered {
            return;
        }
        if let Some(old) = self.drag.hovered.take()
            && let Some(behavior) = self.behavior(old)
        {
            behavior.drag_hover_leave(self, old, &package);
        }
        self.drag.hovered = target;
        if let Some(new) = target
            && let Some(behavior) = self.behavior(new)
        {
            behavior.drag_hover_enter(self, new, &package, pos);
        }
    }

    fn drag_drop(&mut self, pos: Vec2) {
        let Some(package) = self.drag.package.clone() else {
            return;
        };
        let mut success = false;
        if let Some(target) = self.drag.hovered.take() {
            match self.behavior(target) {
                Some(behavior) => {
                    behavior.drag_hover_leave(self, target, &package);
                    success = behavior.drag_handle_drop(self, target, &package, pos);
                }
                None => tracing::warn!(%target, "drop target no longer exists"),
            }
        }
        if let Some(source) = self.drag.source.take()
            && let Some(behavior) = self.behavior(source)
        {
            behavior.drag_end(self, source, success, pos);
            self.redraw(source);
        }
        self.drag.package = None;
        tracing::debug!(package = %package.name, success, "drag finished");
    }

    /// Forget every reference the drag state holds to `id`.
    pub(crate) fn drag_control_deleted(&mut self, id: ControlId) {
        let drag = &mut self.drag;
        if drag.source == Some(id) {
            drag.source = None;
            drag.package = None;
            drag.hovered = None;
            drag.last_pressed = None;
        }
        if drag.last_pressed == Some(id) {
            drag.last_pressed = None;
        }
        if drag.hovered == Some(id) {
            drag.hovered = None;
        }
    }

    /// Draw the package's control under the cursor.
    pub(crate) fn render_drag_overlay(&mut self, painter: &mut Painter) -> Result<(), UiError> {
        let Some(package) = &self.drag.package else {
            return Ok(());
        };
        let Some(draw) = package.draw_control.filter(|c| self.contains(*c)) else {
            return Ok(());
        };
        let at = self.drag.mouse - package.hold_offset;
        self.render_at(draw, painter, at)
    }
}
