//! Services the widget core needs from its host: a clock, the clipboard and
//! the mouse cursor.

use std::cell::RefCell;
use std::time::Instant;

/// Mouse cursor shapes a control can request while hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    #[default]
    Arrow,
    Beam,
    SizeNS,
    SizeWE,
    SizeNWSE,
    SizeNESW,
    SizeAll,
    No,
    Wait,
    Finger,
}

/// Host services consumed by the canvas.
///
/// Every canvas owns exactly one implementation. Methods take `&self`;
/// implementations that keep state use interior mutability.
pub trait Platform {
    /// Monotonic time in seconds. Only differences are meaningful.
    fn time_seconds(&self) -> f64;

    fn clipboard_text(&self) -> Option<String>;

    fn set_clipboard_text(&self, text: &str) -> bool;

    fn set_cursor(&self, cursor: CursorShape);
}

/// Default host services: a monotonic clock, a process-local clipboard and a
/// cursor that is only remembered.
pub struct SystemPlatform {
    start: Instant,
    clipboard: RefCell<Option<String>>,
    cursor: RefCell<CursorShape>,
}

impl SystemPlatform {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            clipboard: RefCell::new(None),
            cursor: RefCell::new(CursorShape::Arrow),
        }
    }

    /// The last cursor requested by the canvas.
    pub fn cursor(&self) -> CursorShape {
        *self.cursor.borrow()
    }
}

impl Default for SystemPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for SystemPlatform {
    fn time_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn clipboard_text(&self) -> Option<String> {
        self.clipboard.borrow().clone()
    }

    fn set_clipboard_text(&self, text: &str) -> bool {
        *self.clipboard.borrow_mut() = Some(text.to_owned());
        true
    }

    fn set_cursor(&self, cursor: CursorShape) {
        tracing::trace!(?cursor, "cursor change");
        *self.cursor.borrow_mut() = cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let platform = SystemPlatform::new();
        let a = platform.time_seconds();
        let b = platform.time_seconds();
        assert!(b >= a);
    }

    #[test]
    fn test_clipboard_round_trip() {
        let platform = SystemPlatform::new();
        assert_eq!(platform.clipboard_text(), None);
        assert!(platform.set_clipboard_text("hello"));
        assert_eq!(platform.clipboard_text().as_deref(), Some("hello"));
    }

    #[test]
    fn test_cursor_is_recorded() {
        let platform = SystemPlatform::new();
        platform.set_cursor(CursorShape::Beam);
        assert_eq!(platform.cursor(), CursorShape::Beam);
    }
}
