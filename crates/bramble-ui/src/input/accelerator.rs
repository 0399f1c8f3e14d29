//! Keyboard accelerators.
//!
//! Accelerators are stored per control under a normalized string such as
//! `"CTRL+SHIFT+S"`. A typed character is matched against the tables of the
//! focused subtree first, then the subtree holding mouse capture, then the
//! whole canvas.

use super::Modifiers;
use crate::canvas::Canvas;
use crate::control::ControlId;
use std::rc::Rc;

/// Canonical form of an accelerator: upper case, no whitespace, modifiers
/// in `CTRL`, `SHIFT`, `ALT` order. `"shift + ctrl + s"` becomes
/// `"CTRL+SHIFT+S"`.
pub fn normalize_accelerator(accelerator: &str) -> String {
    let compact: String = accelerator
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    let mut modifiers = Modifiers::empty();
    let mut key = compact.as_str();
    while let Some((head, rest)) = key.split_once('+') {
        let flag = match head {
            "CTRL" | "CONTROL" => Modifiers::CTRL,
            "SHIFT" => Modifiers::SHIFT,
            "ALT" => Modifiers::ALT,
            _ => break,
        };
        modifiers |= flag;
        key = rest;
    }
    accelerator_string(modifiers, key)
}

fn accelerator_string(modifiers: Modifiers, key: &str) -> String {
    let mut out = String::new();
    if modifiers.contains(Modifiers::CTRL) {
        out.push_str("CTRL+");
    }
    if modifiers.contains(Modifiers::SHIFT) {
        out.push_str("SHIFT+");
    }
    if modifiers.contains(Modifiers::ALT) {
        out.push_str("ALT+");
    }
    out.push_str(key);
    out
}

impl Canvas {
    /// Run `handler` when `accelerator` is typed.
    pub fn add_accelerator(
        &mut self,
        id: ControlId,
        accelerator: &str,
        handler: impl Fn(&mut Canvas, ControlId) + 'static,
    ) {
        let key = normalize_accelerator(accelerator);
        if let Some(control) = self.live_mut(id, "add_accelerator") {
            control.accelerators.insert(key, Rc::new(handler));
        }
    }

    pub fn remove_accelerator(&mut self, id: ControlId, accelerator: &str) -> bool {
        let key = normalize_accelerator(accelerator);
        self.control_mut(id)
            .is_some_and(|c| c.accelerators.shift_remove(&key).is_some())
    }

    /// Only match `id`'s own accelerators while it has keyboard focus.
    pub fn set_accelerator_only_focus(&mut self, id: ControlId, only_focus: bool) {
        if let Some(control) = self.live_mut(id, "set_accelerator_only_focus") {
            control.accelerator_only_focus = only_focus;
        }
    }

    pub(crate) fn handle_accelerator(&mut self, ch: char) -> bool {
        let key: String = ch.to_uppercase().collect();
        let accelerator = accelerator_string(self.modifiers(), &key);

        let candidates = [self.input.keyboard_focus, self.input.mouse_focus, Some(self.root())];
        for start in candidates.into_iter().flatten() {
            if let Some((owner, handler)) = self.find_accelerator(start, &accelerator) {
                tracing::trace!(%owner, accelerator, "accelerator");
                handler(self, owner);
                return true;
            }
        }
        false
    }

    /// Depth-first search of `id`'s shown subtree for a matching handler.
    fn find_accelerator(&self, id: ControlId, accelerator: &str) -> Option<(ControlId, crate::AcceleratorHandler)> {
        let control = self.control(id)?;
        if control.hidden {
            return None;
        }
        if (!control.accelerator_only_focus || self.input.keyboard_focus == Some(id))
            && let Some(handler) = control.accelerators.get(accelerator)
        {
            return Some((id, handler.clone()));
        }
        control
            .children
            .iter()
            .find_map(|child| self.find_accelerator(*child, accelerator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_orders_modifiers() {
        assert_eq!(normalize_accelerator("shift + ctrl + s"), "CTRL+SHIFT+S");
        assert_eq!(normalize_accelerator("Ctrl+C"), "CTRL+C");
        assert_eq!(normalize_accelerator("q"), "Q");
        assert_eq!(normalize_accelerator("Alt+Control+x"), "CTRL+ALT+X");
    }

    #[test]
    fn test_normalize_keeps_plus_key() {
        assert_eq!(normalize_accelerator("ctrl++"), "CTRL++");
    }
}
