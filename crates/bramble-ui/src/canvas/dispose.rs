//! Deferred deletion and disposal.
//!
//! `delayed_delete` detaches a control right away and frees it at the start
//! of the next think pass, so it is safe to call from inside any hook or
//! event handler, including those of the control being deleted.

use super::Canvas;
use crate::control::{ControlId, Lifecycle};

impl Canvas {
    /// Detach `id` now and dispose it at the start of the next think pass.
    pub fn delayed_delete(&mut self, id: ControlId) {
        let root = self.root();
        let Some(control) = self.live_mut(id, "delayed_delete") else {
            return;
        };
        if id == root {
            tracing::warn!("the canvas root cannot be deleted");
            return;
        }
        debug_assert!(
            control.lifecycle == Lifecycle::Live,
            "control {id} queued for deletion twice"
        );
        if control.lifecycle == Lifecycle::PendingDelete {
            tracing::warn!(%id, "control is already queued for deletion");
            return;
        }
        control.lifecycle = Lifecycle::PendingDelete;
        self.detach(id);
        self.delete_queue.push(id);
        tracing::debug!(%id, queued = self.delete_queue.len(), "delayed delete");
    }

    /// Dispose `id` and its whole subtree immediately.
    ///
    /// Every reference the canvas keeps to a disposed control (hover,
    /// capture, focus, drag state, tooltip owner) is cleared and its event
    /// subscriptions are dropped.
    pub fn dispose(&mut self, id: ControlId) {
        debug_assert!(self.contains(id), "control {id} disposed twice");
        if !self.contains(id) {
            return;
        }
        if id == self.root() {
            tracing::warn!("the canvas root cannot be disposed");
            return;
        }
        self.delete_queue.retain(|c| *c != id);
        self.detach(id);
        self.dispose_subtree(id);
    }

    fn dispose_subtree(&mut self, id: ControlId) {
        let Some(control) = self.control_mut(id) else {
            return;
        };
        let children = std::mem::take(&mut control.children);
        let tooltip = control.tooltip.take();
        let cached = control.cache_to_texture;

        for child in children {
            if let Some(c) = self.control_mut(child) {
                c.parent = None;
                c.actual_parent = None;
            }
            self.dispose_subtree(child);
        }

        if let Some(tooltip) = tooltip
            && self.contains(tooltip)
        {
            self.dispose(tooltip);
        }

        self.forget(id);
        self.events.remove_control(id);
        if cached {
            self.released_caches.push(id.cache_key());
        }
        self.delete_queue.retain(|c| *c != id);
        self.controls.try_remove(id.0);
        tracing::trace!(%id, "disposed");
    }

    /// Drop every canvas-level reference to `id`.
    ///
    /// Unlike `blur`, losing keyboard focus here emits no `FocusLost` and
    /// calls no `on_lost_keyboard_focus`, since the control is being disposed.
    fn forget(&mut self, id: ControlId) {
        let input = &mut self.input;
        if input.hovered == Some(id) {
            input.hovered = None;
        }
        if input.mouse_focus == Some(id) {
            input.mouse_focus = None;
        }
        if input.keyboard_focus == Some(id) {
            input.keyboard_focus = None;
        }
        for target in input.repeat_target.iter_mut().filter(|t| **t == Some(id)) {
            *target = None;
        }
        if self.tooltip_owner == Some(id) {
            self.tooltip_owner = None;
        }
        if self.first_tab == Some(id) {
            self.first_tab = None;
        }
        if self.next_tab == Some(id) {
            self.next_tab = None;
        }
        self.drag_control_deleted(id);
    }

    /// Dispose everything queued by [`delayed_delete`](Self::delayed_delete).
    pub fn process_delayed_deletes(&mut self) {
        while !self.delete_queue.is_empty() {
            let queue = std::mem::take(&mut self.delete_queue);
            tracing::debug!(count = queue.len(), "processing delayed deletes");
            for id in queue {
                if self.contains(id) {
                    self.dispose(id);
                }
            }
        }
    }

    /// Controls currently queued for deletion.
    pub fn pending_deletes(&self) -> &[ControlId] {
        &self.delete_queue
    }
}
