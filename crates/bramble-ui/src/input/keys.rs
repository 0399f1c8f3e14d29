use bitflags::bitflags;

/// Keys the canvas routes. Printable input arrives separately through
/// [`Canvas::input_character`](crate::Canvas::input_character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Return,
    Backspace,
    Delete,
    Left,
    Right,
    Shift,
    Tab,
    Space,
    Home,
    End,
    Control,
    Up,
    Down,
    Escape,
    Alt,
}

impl Key {
    pub const ALL: [Key; 15] = [
        Key::Return,
        Key::Backspace,
        Key::Delete,
        Key::Left,
        Key::Right,
        Key::Shift,
        Key::Tab,
        Key::Space,
        Key::Home,
        Key::End,
        Key::Control,
        Key::Up,
        Key::Down,
        Key::Escape,
        Key::Alt,
    ];

    pub fn is_modifier(self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

bitflags! {
    /// Modifier keys currently held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}
