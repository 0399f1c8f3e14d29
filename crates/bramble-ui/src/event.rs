//! Typed observer lists keyed by `(control, event kind)`.
//!
//! Handlers fire in subscription order. Dispatch clones the handler list
//! first, so a handler may subscribe, unsubscribe or dispose controls
//! without disturbing the dispatch in progress.

use crate::canvas::Canvas;
use crate::control::ControlId;
use bramble_core::alloc::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Pressed,
    Released,
    Clicked,
    DoubleClicked,
    RightClicked,
    Toggled,
    ToggledOn,
    ToggledOff,
    HoverEnter,
    HoverLeave,
    BoundsChanged,
    FocusGained,
    FocusLost,
    /// Widget-defined events.
    Custom(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlEvent {
    pub kind: EventKind,
    pub control: ControlId,
}

pub type EventHandler = Rc<dyn Fn(&mut Canvas, &ControlEvent)>;

/// Returned by [`Canvas::on`]; pass it to [`Canvas::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    control: ControlId,
    kind: EventKind,
    id: u64,
}

#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<(ControlId, EventKind), Vec<(u64, EventHandler)>>,
    next_id: u64,
}

impl EventBus {
    pub fn subscribe(&mut self, control: ControlId, kind: EventKind, handler: EventHandler) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers
            .entry((control, kind))
            .or_default()
            .push((id, handler));
        Subscription { control, kind, id }
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let key = (subscription.control, subscription.kind);
        let Some(list) = self.handlers.get_mut(&key) else {
            return false;
        };
        let before = list.len();
        list.retain(|(id, _)| *id != subscription.id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.handlers.remove(&key);
        }
        removed
    }

    pub fn handlers(&self, control: ControlId, kind: EventKind) -> Vec<EventHandler> {
        self.handlers
            .get(&(control, kind))
            .map(|list| list.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    }

    /// Drop every handler attached to `control`.
    pub fn remove_control(&mut self, control: ControlId) {
        self.handlers.retain(|(owner, _), _| *owner != control);
    }

    pub fn handler_count(&self, control: ControlId) -> usize {
        self.handlers
            .iter()
            .filter(|((owner, _), _)| *owner == control)
            .map(|(_, list)| list.len())
            .sum()
    }
}

impl Canvas {
    /// Subscribe to `kind` events fired by `control`.
    pub fn on(
        &mut self,
        control: ControlId,
        kind: EventKind,
        handler: impl Fn(&mut Canvas, &ControlEvent) + 'static,
    ) -> Subscription {
        self.events.subscribe(control, kind, Rc::new(handler))
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    /// Fire `kind` for `control`.
    pub fn emit(&mut self, control: ControlId, kind: EventKind) {
        let handlers = self.events.handlers(control, kind);
        if handlers.is_empty() {
            return;
        }
        tracing::trace!(%control, ?kind, handlers = handlers.len(), "emit");
        let event = ControlEvent { kind, control };
        for handler in handlers {
            handler(self, &event);
        }
    }

    pub fn handler_count(&self, control: ControlId) -> usize {
        self.events.handler_count(control)
    }
}
