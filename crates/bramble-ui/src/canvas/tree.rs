//! Parent/child structure, inner panels and z-order.

use super::Canvas;
use crate::control::{ControlId, Lifecycle};
use crate::error::UiError;

impl Canvas {
    /// Move `id` under `parent` (or detach it with `None`).
    ///
    /// The control is removed from its old parent before it is added to the
    /// new one, so it is never in two child lists. Adding to a control with
    /// an inner panel stores the child in the panel.
    pub fn set_parent(&mut self, id: ControlId, parent: Option<ControlId>) {
        let Some(control) = self.live_mut(id, "set_parent") else {
            return;
        };
        if control.parent == parent {
            return;
        }
        if control.lifecycle == Lifecycle::PendingDelete {
            tracing::warn!(%id, "cannot reparent a control that is queued for deletion");
            return;
        }
        if let Some(p) = parent {
            if !self.contains(p) {
                tracing::warn!(%id, parent = %p, "cannot reparent under a disposed control");
                return;
            }
            if p == id || self.is_descendant_of(p, id) {
                tracing::warn!(%id, parent = %p, "reparenting would create a cycle");
                return;
            }
        }

        self.detach(id);
        if let Some(control) = self.control_mut(id) {
            control.parent = parent;
        }
        if let Some(p) = parent {
            self.attach(p, id);
        }
    }

    /// Equivalent to `set_parent(child, Some(parent))`.
    pub fn add_child(&mut self, parent: ControlId, child: ControlId) {
        self.set_parent(child, Some(parent));
    }

    /// Remove `child` from `parent`, optionally queueing it for deletion.
    ///
    /// Removing a control's inner panel clears the redirection and always
    /// queues the panel, together with the children it holds, for deletion.
    pub fn remove_child(&mut self, parent: ControlId, child: ControlId, dispose: bool) {
        let Some(p) = self.control(parent) else {
            tracing::warn!(%parent, "remove_child on a disposed control");
            return;
        };
        if p.inner_panel == Some(child) {
            if let Some(p) = self.control_mut(parent) {
                p.inner_panel = None;
            }
            self.delayed_delete(child);
            return;
        }
        let actual = self.control(child).and_then(|c| c.actual_parent);
        if let Some(inner) = p.inner_panel
            && actual == Some(self.storage_owner(inner))
        {
            self.remove_child(inner, child, dispose);
            return;
        }
        if actual != Some(parent) {
            return;
        }
        if dispose {
            self.delayed_delete(child);
        } else {
            self.detach(child);
        }
    }

    /// Store `child` in `parent`'s storage owner and notify it.
    fn attach(&mut self, parent: ControlId, child: ControlId) {
        let storage = self.storage_owner(parent);
        let Some(owner) = self.control_mut(storage) else {
            return;
        };
        owner.children.push(child);
        if let Some(c) = self.control_mut(child) {
            c.actual_parent = Some(storage);
        }
        if let Some(behavior) = self.behavior(storage) {
            behavior.on_child_added(self, storage, child);
        }
    }

    /// Take `id` out of its actual parent's child list and clear both parent
    /// links. Fires `on_child_removed` on the actual parent.
    pub(crate) fn detach(&mut self, id: ControlId) {
        let Some(control) = self.control_mut(id) else {
            return;
        };
        let actual = control.actual_parent.take();
        let logical = control.parent.take();

        if let Some(logical) = logical
            && let Some(owner) = self.control_mut(logical)
            && owner.inner_panel == Some(id)
        {
            owner.inner_panel = None;
        }

        let Some(actual) = actual else {
            return;
        };
        let Some(owner) = self.control_mut(actual) else {
            return;
        };
        owner.children.retain(|c| *c != id);
        if let Some(behavior) = self.behavior(actual) {
            behavior.on_child_removed(self, actual, id);
        }
    }

    /// Follow the inner panel chain down to the control that really stores
    /// `id`'s logical children.
    pub(crate) fn storage_owner(&self, id: ControlId) -> ControlId {
        let mut current = id;
        while let Some(inner) = self.control(current).and_then(|c| c.inner_panel) {
            current = inner;
        }
        current
    }

    /// Logical children of `id`, back to front. For a control with an inner
    /// panel these are the panel's children.
    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.control(self.storage_owner(id))
            .map(|c| c.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.control(id)?.parent
    }

    /// Make `panel`, a direct child of `container`, the control that stores
    /// `container`'s logical children from now on.
    pub fn set_inner_panel(&mut self, container: ControlId, panel: ControlId) -> Result<(), UiError> {
        if !self.contains(container) {
            return Err(UiError::StaleControl { control: container });
        }
        if !self.contains(panel) {
            return Err(UiError::StaleControl { control: panel });
        }
        if panel == container || self.control(panel).and_then(|c| c.actual_parent) != Some(container) {
            return Err(UiError::InvalidInnerPanel { container, panel });
        }
        if let Some(c) = self.control_mut(container) {
            c.inner_panel = Some(panel);
        }
        self.invalidate(container);
        Ok(())
    }

    pub fn inner_panel(&self, id: ControlId) -> Option<ControlId> {
        self.control(id)?.inner_panel
    }

    /// True when `child`'s logical parent is `parent`.
    pub fn is_child(&self, parent: ControlId, child: ControlId) -> bool {
        self.control(child).and_then(|c| c.parent) == Some(parent)
    }

    /// True when `ancestor` is above `id` in the actual tree.
    pub fn is_descendant_of(&self, id: ControlId, ancestor: ControlId) -> bool {
        let mut current = self.control(id).and_then(|c| c.actual_parent);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.control(c).and_then(|c| c.actual_parent);
        }
        false
    }

    /// True when `id` hangs off the canvas root.
    pub fn is_attached(&self, id: ControlId) -> bool {
        id == self.root() || self.is_descendant_of(id, self.root())
    }

    /// Move `id` to the front of its actual parent's children.
    pub fn bring_to_front(&mut self, id: ControlId) {
        let Some(parent) = self.control(id).and_then(|c| c.actual_parent) else {
            return;
        };
        let Some(owner) = self.control_mut(parent) else {
            return;
        };
        if owner.children.last() == Some(&id) {
            return;
        }
        owner.children.retain(|c| *c != id);
        owner.children.push(id);
        self.invalidate(parent);
        self.redraw(id);
    }

    /// Move `id` to the back of its actual parent's children.
    pub fn send_to_back(&mut self, id: ControlId) {
        let Some(parent) = self.control(id).and_then(|c| c.actual_parent) else {
            return;
        };
        let Some(owner) = self.control_mut(parent) else {
            return;
        };
        if owner.children.first() == Some(&id) {
            return;
        }
        owner.children.retain(|c| *c != id);
        owner.children.insert(0, id);
        self.invalidate(parent);
        self.redraw(id);
    }

    /// Place `id` directly behind (`behind = true`) or in front of `sibling`.
    /// Falls back to [`bring_to_front`](Self::bring_to_front) when the two
    /// do not share an actual parent.
    pub fn bring_next_to_control(&mut self, id: ControlId, sibling: ControlId, behind: bool) {
        if id == sibling {
            return;
        }
        let Some(parent) = self.control(id).and_then(|c| c.actual_parent) else {
            return;
        };
        let Some(owner) = self.control(parent) else {
            return;
        };
        let mut reordered: Vec<ControlId> = owner.children.iter().copied().filter(|c| *c != id).collect();
        let Some(at) = reordered.iter().position(|c| *c == sibling) else {
            self.bring_to_front(id);
            return;
        };
        reordered.insert(if behind { at } else { at + 1 }, id);
        if reordered == owner.children {
            return;
        }
        if let Some(owner) = self.control_mut(parent) {
            owner.children = reordered;
        }
        self.invalidate(parent);
        self.redraw(id);
    }

    /// Find a logical child by name, searching depth first when `recursive`.
    pub fn find_child_by_name(&self, id: ControlId, name: &str, recursive: bool) -> Option<ControlId> {
        for &child in self.children(id) {
            if self.control(child).is_some_and(|c| !c.name.is_empty() && c.name == name) {
                return Some(child);
            }
            if recursive && let Some(found) = self.find_child_by_name(child, name, true) {
                return Some(found);
            }
        }
        None
    }
}
