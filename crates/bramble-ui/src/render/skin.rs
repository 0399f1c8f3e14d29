//! Skins draw widget chrome through a [`Painter`].
//!
//! Widgets decide *what* state they are in and ask the skin to draw it; the
//! skin decides how that state looks.

use bramble_core::{Color, Edges, Rect};
use bramble_render::{Font, Painter};

/// Visual state of a button face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonLook {
    pub depressed: bool,
    pub hovered: bool,
    pub disabled: bool,
    pub toggled: bool,
}

pub trait Skin {
    fn default_font(&self) -> Font {
        Font::default()
    }

    fn label_color(&self, disabled: bool) -> Color;

    fn button_text_color(&self, look: ButtonLook) -> Color;

    fn draw_button(&self, painter: &mut Painter, rect: Rect, look: ButtonLook);

    /// Frame of a titled container. The border is interrupted where the
    /// title text sits.
    fn draw_group_box(&self, painter: &mut Painter, rect: Rect, text_start: f32, text_height: f32, text_width: f32);

    fn draw_tooltip(&self, painter: &mut Painter, rect: Rect);

    fn draw_keyboard_highlight(&self, painter: &mut Painter, rect: Rect, inset: f32);
}

/// Flat two-tone skin drawn from filled and outlined rectangles only.
#[derive(Debug, Clone)]
pub struct SimpleSkin {
    pub font: Font,
    pub control: Color,
    pub control_bright: Color,
    pub control_dark: Color,
    pub control_darker: Color,
    pub border: Color,
    pub highlight: Color,
    pub text: Color,
    pub text_disabled: Color,
    pub tooltip: Color,
}

impl SimpleSkin {
    pub fn new() -> Self {
        Self {
            font: Font::default(),
            control: Color::from_rgba_u8(190, 190, 190, 255),
            control_bright: Color::from_rgba_u8(255, 255, 255, 255),
            control_dark: Color::from_rgba_u8(140, 140, 140, 255),
            control_darker: Color::from_rgba_u8(90, 90, 90, 255),
            border: Color::from_rgba_u8(80, 80, 80, 255),
            highlight: Color::from_rgba_u8(192, 221, 252, 255),
            text: Color::BLACK,
            text_disabled: Color::GREY,
            tooltip: Color::from_rgba_u8(255, 255, 225, 255),
        }
    }
}

impl Default for SimpleSkin {
    fn default() -> Self {
        Self::new()
    }
}

impl Skin for SimpleSkin {
    fn default_font(&self) -> Font {
        self.font.clone()
    }

    fn label_color(&self, disabled: bool) -> Color {
        if disabled { self.text_disabled } else { self.text }
    }

    fn button_text_color(&self, look: ButtonLook) -> Color {
        if look.disabled {
            self.text_disabled
        } else if look.depressed || look.toggled {
            self.control_bright
        } else {
            self.text
        }
    }

    fn draw_button(&self, painter: &mut Painter, rect: Rect, look: ButtonLook) {
        let face = if look.disabled {
            self.control
        } else if look.depressed || look.toggled {
            self.control_darker
        } else if look.hovered {
            self.highlight
        } else {
            self.control_bright
        };
        painter.fill_rect(rect.shrink(Edges::all(1.0)), face);
        painter.outline_rect(rect, self.border);
    }

    fn draw_group_box(&self, painter: &mut Painter, rect: Rect, text_start: f32, text_height: f32, text_width: f32) {
        let top = rect.y + text_height * 0.5;
        let gap_end = text_start + text_width;
        painter.fill_rect(Rect::new(rect.x, top, text_start - rect.x - 3.0, 1.0), self.control_dark);
        painter.fill_rect(Rect::new(gap_end + 3.0, top, rect.right() - gap_end - 3.0, 1.0), self.control_dark);
        painter.fill_rect(Rect::new(rect.x, top, 1.0, rect.bottom() - top), self.control_dark);
        painter.fill_rect(Rect::new(rect.right() - 1.0, top, 1.0, rect.bottom() - top), self.control_dark);
        painter.fill_rect(Rect::new(rect.x, rect.bottom() - 1.0, rect.width, 1.0), self.control_dark);
    }

    fn draw_tooltip(&self, painter: &mut Painter, rect: Rect) {
        painter.fill_rect(rect, self.tooltip);
        painter.outline_rect(rect, self.border);
    }

    fn draw_keyboard_highlight(&self, painter: &mut Painter, rect: Rect, inset: f32) {
        painter.outline_rect(rect.shrink(Edges::all(inset)), self.border.with_alpha(0.5));
    }
}
