use crate::behavior::Behavior;
use crate::canvas::Canvas;
use crate::control::ControlId;
use crate::render::Skin;
use crate::widgets::find_label;
use bramble_core::{Color, Padding, Pos, Rect, Size};
use bramble_render::{Font, Painter};
use std::cell::RefCell;

#[derive(Debug, Clone)]
struct LabelState {
    text: String,
    /// `None` uses the skin's default font.
    font: Option<Font>,
    alignment: Pos,
    text_padding: Padding,
    /// `None` uses the skin's label colour.
    text_color: Option<Color>,
    /// Where the text was placed by the last layout, local to the control.
    text_rect: Rect,
}

/// A single line of text.
///
/// The functions that change a label also work on any widget built around
/// one, such as [`Button`](crate::widgets::Button).
#[derive(Debug)]
pub struct Label {
    state: RefCell<LabelState>,
}

impl Label {
    pub fn new() -> Self {
        Self::with_alignment(Pos::LEFT | Pos::TOP)
    }

    pub(crate) fn with_alignment(alignment: Pos) -> Self {
        Self {
            state: RefCell::new(LabelState {
                text: String::new(),
                font: None,
                alignment,
                text_padding: Padding::ZERO,
                text_color: None,
                text_rect: Rect::ZERO,
            }),
        }
    }

    pub fn create(cx: &mut Canvas, parent: Option<ControlId>) -> ControlId {
        cx.create(parent, Label::new())
    }

    pub fn text(cx: &Canvas, id: ControlId) -> Option<String> {
        Some(find_label(cx, id)?.state.borrow().text.clone())
    }

    pub fn set_text(cx: &mut Canvas, id: ControlId, text: &str) {
        if Self::update(cx, id, |s| {
            if s.text == text {
                return false;
            }
            s.text = text.to_owned();
            true
        }) {
            cx.invalidate(id);
            cx.redraw(id);
        }
    }

    pub fn set_font(cx: &mut Canvas, id: ControlId, font: Option<Font>) {
        if Self::update(cx, id, |s| {
            s.font = font;
            true
        }) {
            cx.invalidate(id);
            cx.redraw(id);
        }
    }

    pub fn set_alignment(cx: &mut Canvas, id: ControlId, alignment: Pos) {
        if Self::update(cx, id, |s| {
            s.alignment = alignment;
            true
        }) {
            cx.invalidate(id);
            cx.redraw(id);
        }
    }

    pub fn set_text_padding(cx: &mut Canvas, id: ControlId, padding: Padding) {
        if Self::update(cx, id, |s| {
            s.text_padding = padding;
            true
        }) {
            cx.invalidate(id);
            cx.redraw(id);
        }
    }

    pub fn set_text_color(cx: &mut Canvas, id: ControlId, color: Option<Color>) {
        if Self::update(cx, id, |s| {
            s.text_color = color;
            true
        }) {
            cx.redraw(id);
        }
    }

    /// Where the text was placed by the last layout.
    pub fn text_rect(cx: &Canvas, id: ControlId) -> Option<Rect> {
        Some(find_label(cx, id)?.state.borrow().text_rect)
    }

    /// Resize the control to fit its text plus both paddings.
    pub fn size_to_contents(cx: &mut Canvas, id: ControlId) -> bool {
        let Some(label) = find_label(cx, id) else {
            return false;
        };
        let state = label.state.borrow().clone();
        let font = Self::resolve_font(cx, id, &state);
        let text = cx.measure_text(&font, &state.text);
        let Some(padding) = cx.control(id).map(|c| c.padding()) else {
            return false;
        };
        let size = Size::new(
            text.width + padding.horizontal() + state.text_padding.horizontal(),
            text.height + padding.vertical() + state.text_padding.vertical(),
        );
        let changed = cx.set_size(id, size);
        cx.invalidate(id);
        changed
    }

    fn update(cx: &Canvas, id: ControlId, op: impl FnOnce(&mut LabelState) -> bool) -> bool {
        match find_label(cx, id) {
            Some(label) => op(&mut label.state.borrow_mut()),
            None => {
                tracing::warn!(%id, "control has no label");
                false
            }
        }
    }

    fn resolve_font(cx: &Canvas, id: ControlId, state: &LabelState) -> Font {
        match &state.font {
            Some(font) => font.clone(),
            None => cx
                .skin_for(id)
                .map(|skin| skin.default_font())
                .unwrap_or_default(),
        }
    }

    pub(crate) fn font(&self, cx: &Canvas, id: ControlId) -> Font {
        Self::resolve_font(cx, id, &self.state.borrow())
    }

    pub(crate) fn text_size(&self, cx: &Canvas, id: ControlId) -> Size {
        let font = self.font(cx, id);
        cx.measure_text(&font, &self.state.borrow().text)
    }

    /// Place the text inside the padded area.
    pub(crate) fn layout_text(&self, cx: &Canvas, id: ControlId) {
        let Some(control) = cx.control(id) else {
            return;
        };
        let size = self.text_size(cx, id);
        let mut state = self.state.borrow_mut();
        let area = control
            .render_bounds()
            .shrink(control.padding())
            .shrink(state.text_padding);
        state.text_rect = area.align(size, state.alignment);
    }

    pub(crate) fn draw_text(&self, cx: &Canvas, id: ControlId, painter: &mut Painter, color: Color) {
        let font = self.font(cx, id);
        let state = self.state.borrow();
        let color = state.text_color.unwrap_or(color);
        painter.draw_text(&font, state.text_rect.origin(), &state.text, color);
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for Label {
    fn layout(&self, cx: &mut Canvas, id: ControlId) {
        self.layout_text(cx, id);
    }

    fn render(&self, cx: &Canvas, id: ControlId, skin: &dyn Skin, painter: &mut Painter) {
        let disabled = cx.is_disabled(id);
        self.draw_text(cx, id, painter, skin.label_color(disabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bramble_test_utils::RecordingRenderer;

    #[test]
    fn test_size_to_contents_includes_padding() {
        let mut cx = Canvas::new(RecordingRenderer::new());
        let root = cx.root();
        let label = Label::create(&mut cx, Some(root));
        Label::set_text(&mut cx, label, "abcd");
        Label::set_text_padding(&mut cx, label, Padding::new(2.0, 1.0, 2.0, 1.0));
        Label::size_to_contents(&mut cx, label);

        // Four characters at half the default 12px size.
        let bounds = cx.control(label).map(|c| c.bounds()).unwrap();
        assert_eq!(bounds.size(), Size::new(28.0, 14.0));
    }

    #[test]
    fn test_set_text_invalidates_only_on_change() {
        let mut cx = Canvas::new(RecordingRenderer::new());
        let label = Label::create(&mut cx, None);
        Label::set_text(&mut cx, label, "a");
        cx.recurse_layout(label);
        assert!(!cx.control(label).unwrap().needs_layout());

        Label::set_text(&mut cx, label, "a");
        assert!(!cx.control(label).unwrap().needs_layout());
        Label::set_text(&mut cx, label, "b");
        assert!(cx.control(label).unwrap().needs_layout());
    }
}
