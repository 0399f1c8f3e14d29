//! Control nodes stored in the canvas arena.

use crate::behavior::Behavior;
use crate::canvas::Canvas;
use crate::dirty::DirtyFlags;
use crate::drag_drop::Package;
use bramble_core::alloc::sparse_set::IndexSlot;
use bramble_core::platform::CursorShape;
use bramble_core::{Margin, Padding, Pos, Rect, Size};
use bramble_render::CacheKey;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Handle to a control owned by a [`Canvas`].
///
/// Handles are generational: once the control is disposed the handle stays
/// invalid even if its slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlId(pub(crate) IndexSlot);

impl ControlId {
    pub fn to_bits(self) -> u64 {
        self.0.to_bits()
    }

    /// Key of the offscreen surface used when this control caches to texture.
    pub fn cache_key(self) -> CacheKey {
        CacheKey(self.to_bits())
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.0.index(), self.0.generation())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Live,
    /// Detached and queued for disposal at the start of the next think pass.
    PendingDelete,
}

pub type AcceleratorHandler = Rc<dyn Fn(&mut Canvas, ControlId)>;

/// A node of the control tree.
///
/// Read access is public through [`Canvas::control`]; all mutation goes
/// through `Canvas` so that invalidation and notifications stay consistent.
pub struct Control {
    pub(crate) name: String,
    /// Content owner: the control this one was added to.
    pub(crate) parent: Option<ControlId>,
    /// Storage owner: the control whose child list holds this one. Differs
    /// from `parent` when `parent` redirects children to an inner panel.
    pub(crate) actual_parent: Option<ControlId>,
    pub(crate) children: Vec<ControlId>,
    pub(crate) inner_panel: Option<ControlId>,

    pub(crate) bounds: Rect,
    pub(crate) render_bounds: Rect,
    pub(crate) inner_bounds: Rect,
    pub(crate) margin: Margin,
    pub(crate) padding: Padding,
    pub(crate) dock: Pos,
    pub(crate) min_size: Size,
    pub(crate) max_size: Size,

    pub(crate) hidden: bool,
    pub(crate) disabled: bool,
    pub(crate) mouse_input: bool,
    pub(crate) keyboard_input: bool,
    pub(crate) tabable: bool,
    pub(crate) cache_to_texture: bool,
    pub(crate) restrict_to_parent: bool,
    pub(crate) include_in_size: bool,
    pub(crate) dirty: DirtyFlags,

    pub(crate) skin: Option<Rc<dyn crate::Skin>>,
    pub(crate) tooltip: Option<ControlId>,
    pub(crate) cursor: CursorShape,
    pub(crate) user_data: Option<Box<dyn Any>>,
    pub(crate) accelerators: IndexMap<String, AcceleratorHandler>,
    pub(crate) accelerator_only_focus: bool,
    pub(crate) drag_package: Option<Package>,

    pub(crate) behavior: Rc<dyn Behavior>,
    pub(crate) lifecycle: Lifecycle,
}

impl Control {
    pub(crate) fn new(behavior: Rc<dyn Behavior>) -> Self {
        Self {
            name: String::new(),
            parent: None,
            actual_parent: None,
            children: Vec::new(),
            inner_panel: None,
            bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
            render_bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
            inner_bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
            margin: Margin::ZERO,
            padding: Padding::ZERO,
            dock: Pos::NONE,
            min_size: Size::ZERO,
            max_size: Size::new(f32::INFINITY, f32::INFINITY),
            hidden: false,
            disabled: false,
            mouse_input: true,
            keyboard_input: false,
            tabable: false,
            cache_to_texture: false,
            restrict_to_parent: false,
            include_in_size: true,
            dirty: DirtyFlags::ALL,
            skin: None,
            tooltip: None,
            cursor: CursorShape::Arrow,
            user_data: None,
            accelerators: IndexMap::new(),
            accelerator_only_focus: false,
            drag_package: None,
            behavior,
            lifecycle: Lifecycle::Live,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The logical parent.
    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    /// The control whose child list physically holds this one.
    pub fn actual_parent(&self) -> Option<ControlId> {
        self.actual_parent
    }

    /// Children in this control's own storage, back to front. See
    /// [`Canvas::children`] for the logical view.
    pub fn actual_children(&self) -> &[ControlId] {
        &self.children
    }

    pub fn inner_panel(&self) -> Option<ControlId> {
        self.inner_panel
    }

    /// Position and size relative to the actual parent.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Bounds at the control's own origin.
    pub fn render_bounds(&self) -> Rect {
        self.render_bounds
    }

    /// The space docked children left over during the last layout.
    pub fn inner_bounds(&self) -> Rect {
        self.inner_bounds
    }

    pub fn x(&self) -> f32 {
        self.bounds.x
    }

    pub fn y(&self) -> f32 {
        self.bounds.y
    }

    pub fn width(&self) -> f32 {
        self.bounds.width
    }

    pub fn height(&self) -> f32 {
        self.bounds.height
    }

    /// Right edge including the right margin.
    pub fn right(&self) -> f32 {
        self.bounds.right() + self.margin.right
    }

    /// Bottom edge including the bottom margin.
    pub fn bottom(&self) -> f32 {
        self.bounds.bottom() + self.margin.bottom
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn dock(&self) -> Pos {
        self.dock
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    pub fn max_size(&self) -> Size {
        self.max_size
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn mouse_input_enabled(&self) -> bool {
        self.mouse_input
    }

    pub fn keyboard_input_enabled(&self) -> bool {
        self.keyboard_input
    }

    pub fn is_tabable(&self) -> bool {
        self.tabable
    }

    pub fn cache_to_texture(&self) -> bool {
        self.cache_to_texture
    }

    pub fn restrict_to_parent(&self) -> bool {
        self.restrict_to_parent
    }

    pub fn include_in_size(&self) -> bool {
        self.include_in_size
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn needs_layout(&self) -> bool {
        self.dirty.needs_layout()
    }

    pub fn cache_dirty(&self) -> bool {
        self.dirty.cache_dirty()
    }

    pub fn tooltip(&self) -> Option<ControlId> {
        self.tooltip
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_ref()?.downcast_ref()
    }

    pub fn has_accelerator(&self, accelerator: &str) -> bool {
        self.accelerators
            .contains_key(&crate::input::normalize_accelerator(accelerator))
    }

    pub fn accelerator_only_focus(&self) -> bool {
        self.accelerator_only_focus
    }

    pub fn drag_package(&self) -> Option<&Package> {
        self.drag_package.as_ref()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_pending_delete(&self) -> bool {
        self.lifecycle == Lifecycle::PendingDelete
    }

    /// Downcast the control's behavior.
    pub fn behavior<T: Behavior>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.behavior;
        any.downcast_ref()
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("actual_parent", &self.actual_parent)
            .field("children", &self.children)
            .field("inner_panel", &self.inner_panel)
            .field("bounds", &self.bounds)
            .field("dock", &self.dock)
            .field("hidden", &self.hidden)
            .field("dirty", &self.dirty)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}
