use bramble_core::platform::{CursorShape, Platform};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct PlatformState {
    time: f64,
    clipboard: Option<String>,
    cursors: Vec<CursorShape>,
}

/// Platform double with a manually advanced clock.
#[derive(Debug, Clone, Default)]
pub struct MockPlatform {
    state: Arc<Mutex<PlatformState>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&self, seconds: f64) {
        self.state.lock().time = seconds;
    }

    pub fn advance(&self, seconds: f64) {
        self.state.lock().time += seconds;
    }

    /// The most recent cursor the canvas asked for.
    pub fn cursor(&self) -> Option<CursorShape> {
        self.state.lock().cursors.last().copied()
    }

    /// Every cursor change, oldest first.
    pub fn cursor_history(&self) -> Vec<CursorShape> {
        self.state.lock().cursors.clone()
    }
}

impl Platform for MockPlatform {
    fn time_seconds(&self) -> f64 {
        self.state.lock().time
    }

    fn clipboard_text(&self) -> Option<String> {
        self.state.lock().clipboard.clone()
    }

    fn set_clipboard_text(&self, text: &str) -> bool {
        self.state.lock().clipboard = Some(text.to_owned());
        true
    }

    fn set_cursor(&self, cursor: CursorShape) {
        self.state.lock().cursors.push(cursor);
    }
}
