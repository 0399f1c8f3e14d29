use crate::behavior::Behavior;
use crate::canvas::Canvas;
use crate::control::ControlId;
use crate::render::Skin;
use crate::widgets::Label;
use bramble_core::{Margin, Padding, Pos};
use bramble_render::Painter;

/// Space between the frame and the content panel.
const INNER_MARGIN: f32 = 6.0;

/// A titled frame. Children added to it are stored in an inner panel
/// that fills the frame below the title.
#[derive(Debug)]
pub struct GroupPanel {
    label: Label,
}

impl GroupPanel {
    pub fn new() -> Self {
        Self {
            label: Label::with_alignment(Pos::TOP | Pos::LEFT),
        }
    }

    pub fn create(cx: &mut Canvas, parent: Option<ControlId>, title: &str) -> ControlId {
        let id = cx.create(parent, GroupPanel::new());
        Label::set_text_padding(cx, id, Padding::new(10.0, 0.0, 10.0, 0.0));
        Label::set_text(cx, id, title);

        let inner = cx.create_panel(Some(id));
        cx.set_name(inner, "inner");
        cx.set_dock(inner, Pos::FILL);
        if let Err(err) = cx.set_inner_panel(id, inner) {
            tracing::error!(%err, "group panel without an inner panel");
        }
        id
    }

    pub(crate) fn label(&self) -> &Label {
        &self.label
    }
}

impl Default for GroupPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for GroupPanel {
    fn layout(&self, cx: &mut Canvas, id: ControlId) {
        self.label.layout_text(cx, id);
        let text_height = self.label.text_size(cx, id).height;
        if let Some(inner) = cx.inner_panel(id) {
            cx.set_margin(
                inner,
                Margin::new(INNER_MARGIN, text_height + 3.0, INNER_MARGIN, INNER_MARGIN),
            );
        }
    }

    fn render(&self, cx: &Canvas, id: ControlId, skin: &dyn Skin, painter: &mut Painter) {
        let Some(bounds) = cx.control(id).map(|c| c.render_bounds()) else {
            return;
        };
        let text = Label::text_rect(cx, id).unwrap_or_default();
        skin.draw_group_box(painter, bounds, text.x, text.height, text.width);
        self.label.draw_text(cx, id, painter, skin.label_color(cx.is_disabled(id)));
    }
}
