//! The canvas: root of a control tree and owner of everything that is
//! shared across it (arena, input state, delete queue, tab cursors).

mod dispose;
mod geometry;
mod tree;

use crate::behavior::{Behavior, Panel};
use crate::config::CanvasConfig;
use crate::control::{Control, ControlId};
use crate::drag_drop::DragState;
use crate::event::EventBus;
use crate::input::InputState;
use crate::render::{SimpleSkin, Skin};
use bramble_core::alloc::sparse_set::SparseSet;
use bramble_core::platform::{CursorShape, Platform, SystemPlatform};
use bramble_core::profiling::profile_function;
use bramble_core::{Rect, Size};
use bramble_render::{CacheKey, Font, Renderer, SharedRenderer};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// Root of a control tree.
///
/// Single-threaded and frame driven: the embedder feeds platform input
/// through the `input_*` methods between frames and calls
/// [`render_canvas`](Canvas::render_canvas) once per frame.
pub struct Canvas {
    pub(crate) controls: SparseSet<Control>,
    root: ControlId,
    pub(crate) renderer: SharedRenderer,
    pub(crate) platform: Box<dyn Platform>,
    pub(crate) skin: Option<Rc<dyn Skin>>,
    pub(crate) config: CanvasConfig,
    pub(crate) events: EventBus,
    pub(crate) input: InputState,
    pub(crate) drag: DragState,
    pub(crate) tooltip_owner: Option<ControlId>,
    pub(crate) delete_queue: Vec<ControlId>,
    pub(crate) first_tab: Option<ControlId>,
    pub(crate) next_tab: Option<ControlId>,
    /// Set while the think pass lays out the tree; layout run on demand
    /// during rendering does not touch the tab cursors.
    pub(crate) track_tabs: bool,
    pub(crate) released_caches: Vec<CacheKey>,
}

impl Canvas {
    pub fn new(renderer: impl Renderer + 'static) -> Self {
        Self::with_config(renderer, CanvasConfig::default())
    }

    pub fn with_config(renderer: impl Renderer + 'static, config: CanvasConfig) -> Self {
        let renderer: SharedRenderer = Rc::new(RefCell::new(renderer));
        let mut controls = SparseSet::new();
        let mut root = Control::new(Rc::new(Panel));
        root.name = "canvas".to_string();
        root.bounds = Rect::ZERO;
        root.render_bounds = Rect::ZERO;
        root.inner_bounds = Rect::ZERO;
        let root = ControlId(controls.push(root));
        tracing::debug!(%root, "canvas created");

        Self {
            controls,
            root,
            renderer,
            platform: Box::new(SystemPlatform::new()),
            skin: Some(Rc::new(SimpleSkin::new())),
            config,
            events: EventBus::default(),
            input: InputState::default(),
            drag: DragState::default(),
            tooltip_owner: None,
            delete_queue: Vec::new(),
            first_tab: None,
            next_tab: None,
            track_tabs: false,
            released_caches: Vec::new(),
        }
    }

    pub fn set_platform(&mut self, platform: impl Platform + 'static) {
        self.platform = Box::new(platform);
    }

    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    /// The canvas-wide skin used by controls without one of their own.
    pub fn set_skin(&mut self, skin: Option<Rc<dyn Skin>>) {
        self.skin = skin;
        self.invalidate(self.root);
        self.redraw(self.root);
    }

    pub fn skin(&self) -> Option<&Rc<dyn Skin>> {
        self.skin.as_ref()
    }

    /// The skin `id` renders with: its own, the nearest ancestor's, or the
    /// canvas default.
    pub fn skin_for(&self, id: ControlId) -> Option<Rc<dyn Skin>> {
        let mut current = Some(id);
        while let Some(c) = current {
            let control = self.controls.try_get(c.0)?;
            if let Some(skin) = &control.skin {
                return Some(skin.clone());
            }
            current = control.actual_parent;
        }
        self.skin.clone()
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CanvasConfig {
        &mut self.config
    }

    pub fn root(&self) -> ControlId {
        self.root
    }

    pub fn size(&self) -> Size {
        self.controls
            .try_get(self.root.0)
            .map(|c| c.bounds.size())
            .unwrap_or(Size::ZERO)
    }

    /// Resize the canvas; the root control takes the whole area.
    pub fn resize(&mut self, size: Size) {
        self.set_bounds(self.root, Rect::from_size(size));
    }

    /// Number of live controls, the root and controls awaiting deletion
    /// included.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// True while `id` refers to a control that has not been disposed.
    pub fn contains(&self, id: ControlId) -> bool {
        self.controls.contains(id.0)
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.try_get(id.0)
    }

    pub(crate) fn control_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.try_get_mut(id.0)
    }

    /// Like `control_mut`, but logs when the handle is stale.
    pub(crate) fn live_mut(&mut self, id: ControlId, op: &'static str) -> Option<&mut Control> {
        let control = self.controls.try_get_mut(id.0);
        if control.is_none() {
            tracing::warn!(%id, op, "ignoring operation on a disposed control");
        }
        control
    }

    pub(crate) fn behavior(&self, id: ControlId) -> Option<Rc<dyn Behavior>> {
        self.controls.try_get(id.0).map(|c| c.behavior.clone())
    }

    /// Create a control and attach it to `parent`.
    pub fn create(&mut self, parent: Option<ControlId>, behavior: impl Behavior) -> ControlId {
        self.create_with(parent, Rc::new(behavior))
    }

    pub fn create_with(&mut self, parent: Option<ControlId>, behavior: Rc<dyn Behavior>) -> ControlId {
        let id = ControlId(self.controls.push(Control::new(behavior)));
        if parent.is_some() {
            self.set_parent(id, parent);
        }
        id
    }

    /// Create a plain [`Panel`].
    pub fn create_panel(&mut self, parent: Option<ControlId>) -> ControlId {
        self.create(parent, Panel)
    }

    pub fn set_name(&mut self, id: ControlId, name: impl Into<String>) {
        if let Some(control) = self.live_mut(id, "set_name") {
            control.name = name.into();
        }
    }

    pub fn set_user_data(&mut self, id: ControlId, data: impl Any) {
        if let Some(control) = self.live_mut(id, "set_user_data") {
            control.user_data = Some(Box::new(data));
        }
    }

    pub fn set_cursor(&mut self, id: ControlId, cursor: CursorShape) {
        if let Some(control) = self.live_mut(id, "set_cursor") {
            control.cursor = cursor;
        }
    }

    pub fn set_mouse_input_enabled(&mut self, id: ControlId, enabled: bool) {
        if let Some(control) = self.live_mut(id, "set_mouse_input_enabled") {
            control.mouse_input = enabled;
        }
    }

    pub fn set_keyboard_input_enabled(&mut self, id: ControlId, enabled: bool) {
        if let Some(control) = self.live_mut(id, "set_keyboard_input_enabled") {
            control.keyboard_input = enabled;
        }
    }

    pub fn set_tabable(&mut self, id: ControlId, tabable: bool) {
        if let Some(control) = self.live_mut(id, "set_tabable") {
            control.tabable = tabable;
        }
    }

    pub fn set_cache_to_texture(&mut self, id: ControlId, enabled: bool) {
        let Some(control) = self.live_mut(id, "set_cache_to_texture") else {
            return;
        };
        if control.cache_to_texture == enabled {
            return;
        }
        control.cache_to_texture = enabled;
        if !enabled {
            self.released_caches.push(id.cache_key());
        }
        self.redraw(id);
    }

    pub fn set_restrict_to_parent(&mut self, id: ControlId, restrict: bool) {
        if let Some(control) = self.live_mut(id, "set_restrict_to_parent") {
            control.restrict_to_parent = restrict;
        }
    }

    /// Whether `id` counts towards its parent's [`child_extent`](Canvas::child_extent).
    pub fn set_include_in_size(&mut self, id: ControlId, include: bool) {
        if let Some(control) = self.live_mut(id, "set_include_in_size") {
            control.include_in_size = include;
        }
    }

    /// Give `id` (and its descendants without their own) a skin.
    pub fn set_control_skin(&mut self, id: ControlId, skin: Option<Rc<dyn Skin>>) {
        let Some(control) = self.live_mut(id, "set_control_skin") else {
            return;
        };
        control.skin = skin;
        self.invalidate(id);
        self.redraw(id);
    }

    /// Measure `text` with the canvas renderer.
    pub fn measure_text(&self, font: &Font, text: &str) -> Size {
        if text.is_empty() {
            return Size::new(0.0, font.size);
        }
        self.renderer.borrow().measure_text(font, text)
    }

    pub fn first_tab(&self) -> Option<ControlId> {
        self.first_tab
    }

    pub fn next_tab(&self) -> Option<ControlId> {
        self.next_tab
    }

    /// Per-frame housekeeping: flush the delete queue, lay out the tree,
    /// recompute the tab cursors and run input upkeep (focus validity, key
    /// repeat).
    pub fn do_think(&mut self) {
        profile_function!();
        self.process_delayed_deletes();

        if self.control(self.root).is_none_or(|c| c.hidden) {
            return;
        }

        self.first_tab = None;
        self.next_tab = None;
        self.track_tabs = true;
        self.recurse_layout(self.root);
        self.track_tabs = false;

        if self.next_tab.is_none() {
            self.next_tab = self.first_tab;
        }

        self.on_canvas_think();
    }
}
