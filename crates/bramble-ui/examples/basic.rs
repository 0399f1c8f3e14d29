//! Headless walkthrough of a small form.
//!
//! Builds a dialog out of a group panel, a label and two buttons, feeds it
//! a few synthetic mouse and keyboard events and renders frames through a
//! renderer that only logs what it is asked to draw.
//!
//! Run with `RUST_LOG=trace` to see hover, focus and layout tracing from the
//! canvas as well.

use bramble_core::logging;
use bramble_core::math::Vec2;
use bramble_core::{Color, Pos, Rect, Size};
use bramble_render::{Font, Renderer, Texture};
use bramble_ui::widgets::{Button, GroupPanel, Label};
use bramble_ui::{Canvas, EventKind, Key, MouseButton};

/// Logs draw calls instead of rasterising them.
#[derive(Default)]
struct LogRenderer {
    draws: usize,
}

impl Renderer for LogRenderer {
    fn begin(&mut self) {
        self.draws = 0;
    }

    fn end(&mut self) {
        tracing::info!(draws = self.draws, "frame done");
    }

    fn start_clip(&mut self, clip: Rect) {
        tracing::trace!(?clip, "clip");
    }

    fn end_clip(&mut self) {}

    fn draw_filled_rect(&mut self, rect: Rect, color: Color) {
        self.draws += 1;
        tracing::debug!(?rect, ?color, "fill");
    }

    fn draw_textured_rect(&mut self, texture: &Texture, rect: Rect, _uv: [f32; 4], _color: Color) {
        self.draws += 1;
        tracing::debug!(texture = %texture.name, ?rect, "texture");
    }

    fn render_text(&mut self, _font: &Font, pos: Vec2, text: &str, _color: Color) {
        self.draws += 1;
        tracing::info!(text, x = pos.x, y = pos.y, "text");
    }

    fn measure_text(&self, font: &Font, text: &str) -> Size {
        Size::new(text.chars().count() as f32 * font.size * 0.55, font.size)
    }
}

fn main() {
    logging::init();

    let mut cx = Canvas::new(LogRenderer::default());
    cx.resize(Size::new(320.0, 200.0));
    let root = cx.root();

    let group = GroupPanel::create(&mut cx, Some(root), "Connection");
    cx.set_dock(group, Pos::FILL);

    let prompt = Label::create(&mut cx, Some(group));
    Label::set_text(&mut cx, prompt, "Connect to the server?");
    Label::size_to_contents(&mut cx, prompt);
    cx.set_dock(prompt, Pos::TOP);

    let ok = Button::create(&mut cx, Some(group), "Connect");
    cx.set_dock(ok, Pos::LEFT);
    let cancel = Button::create(&mut cx, Some(group), "Cancel");
    cx.set_dock(cancel, Pos::RIGHT);

    cx.on(ok, EventKind::Clicked, |_, event| {
        tracing::info!(control = %event.control, "connect clicked");
    });
    cx.on(cancel, EventKind::Clicked, |cx, event| {
        tracing::info!("closing the dialog");
        if let Some(group) = cx.parent(event.control) {
            cx.delayed_delete(group);
        }
    });
    cx.add_accelerator(root, "ctrl+q", |cx, _| {
        tracing::info!("quit accelerator");
        let root = cx.root();
        cx.set_hidden(root, true);
    });

    if let Err(err) = cx.render_canvas() {
        tracing::error!(%err, "render failed");
        return;
    }

    // Click "Connect".
    let at = cx.local_to_canvas(ok, Vec2::new(5.0, 5.0));
    cx.input_mouse_moved(at.x, at.y, 0.0, 0.0);
    cx.input_mouse_button(MouseButton::Left, true);
    cx.input_mouse_button(MouseButton::Left, false);

    // Tab to the next button and press it with the keyboard.
    cx.do_think();
    cx.input_key(Key::Tab, true);
    cx.input_key(Key::Tab, false);
    tracing::info!(focus = ?cx.keyboard_focus(), "after tab");
    cx.input_key(Key::Space, true);
    cx.input_key(Key::Space, false);

    if let Err(err) = cx.render_canvas() {
        tracing::error!(%err, "render failed");
    }

    cx.input_key(Key::Control, true);
    cx.input_character('q');
    cx.input_key(Key::Control, false);
    tracing::info!(controls = cx.len(), hidden = cx.is_hidden(root), "done");
}
