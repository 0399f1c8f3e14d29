//! Hover tooltips.
//!
//! A tooltip is an ordinary control kept outside the tree and owned by the
//! control it describes. While the cursor is over the owner, or over a
//! descendant without a tooltip of its own, the canvas draws it next to the
//! cursor after everything else.

use crate::canvas::Canvas;
use crate::control::ControlId;
use crate::error::UiError;
use crate::widgets::Label;
use bramble_core::math::Vec2;
use bramble_core::{Padding, Rect};
use bramble_render::Painter;

const TOOLTIP_TEXT_PADDING: Padding = Padding::new(5.0, 3.0, 5.0, 3.0);

impl Canvas {
    /// Make `tooltip` the tooltip of `id`. The tooltip is taken out of the
    /// tree; a previous tooltip is disposed.
    pub fn set_tooltip(&mut self, id: ControlId, tooltip: Option<ControlId>) {
        if !self.contains(id) {
            tracing::warn!(%id, "ignoring set_tooltip on a disposed control");
            return;
        }
        if let Some(tooltip) = tooltip {
            self.set_parent(tooltip, None);
        }
        let old = match self.control_mut(id) {
            Some(control) => std::mem::replace(&mut control.tooltip, tooltip),
            None => return,
        };
        if let Some(old) = old
            && Some(old) != tooltip
            && self.contains(old)
        {
            self.dispose(old);
        }
        self.update_tooltip_owner();
    }

    /// Give `id` a plain text tooltip.
    pub fn set_tooltip_text(&mut self, id: ControlId, text: &str) -> ControlId {
        let label = Label::create(self, None);
        Label::set_text(self, label, text);
        Label::set_text_padding(self, label, TOOLTIP_TEXT_PADDING);
        Label::size_to_contents(self, label);
        self.set_mouse_input_enabled(label, false);
        self.set_tooltip(id, Some(label));
        label
    }

    /// The control whose tooltip is showing.
    pub fn tooltip_owner(&self) -> Option<ControlId> {
        self.tooltip_owner
    }

    /// The tooltip being shown.
    pub fn active_tooltip(&self) -> Option<ControlId> {
        let tooltip = self.control(self.tooltip_owner?)?.tooltip?;
        self.contains(tooltip).then_some(tooltip)
    }

    pub(crate) fn update_tooltip_owner(&mut self) {
        let mut current = self.input.hovered;
        let mut owner = None;
        while let Some(c) = current {
            let Some(control) = self.control(c) else {
                break;
            };
            if control.tooltip.is_some() {
                owner = Some(c);
                break;
            }
            current = control.parent;
        }
        if owner != self.tooltip_owner {
            tracing::trace!(?owner, "tooltip owner");
            self.tooltip_owner = owner;
        }
    }

    pub(crate) fn render_tooltip(&mut self, painter: &mut Painter) -> Result<(), UiError> {
        let Some(tooltip) = self.active_tooltip() else {
            return Ok(());
        };
        if self.control(tooltip).is_some_and(|c| c.needs_layout()) {
            self.recurse_layout(tooltip);
        }
        let Some(size) = self.control(tooltip).map(|c| c.bounds.size()) else {
            return Ok(());
        };
        let canvas = self.size();
        let wanted = self.input.mouse_position + self.config.tooltip_offset;
        let at = Vec2::new(
            wanted.x.min(canvas.width - size.width).max(0.0),
            wanted.y.min(canvas.height - size.height).max(0.0),
        );

        if let Some(skin) = self.skin_for(tooltip) {
            let old_offset = painter.offset();
            let old_clip = painter.clip_region();
            painter.set_offset(at);
            painter.set_clip_region(Rect::from_size(canvas));
            painter.start_clip();
            skin.draw_tooltip(painter, Rect::from_size(size));
            painter.set_offset(old_offset);
            painter.set_clip_region(old_clip);
        }
        self.render_at(tooltip, painter, at)
    }
}
