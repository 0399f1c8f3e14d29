//! Reference widgets built on [`Behavior`](crate::Behavior).

mod button;
mod group_panel;
mod label;

pub use button::{BUTTON_PACKAGE, Button};
pub use group_panel::GroupPanel;
pub use label::Label;

use crate::canvas::Canvas;
use crate::control::ControlId;

/// The label part of `id`, for any widget that draws text through one.
pub(crate) fn find_label(cx: &Canvas, id: ControlId) -> Option<&Label> {
    let control = cx.control(id)?;
    control
        .behavior::<Label>()
        .or_else(|| control.behavior::<Button>().map(Button::label))
        .or_else(|| control.behavior::<GroupPanel>().map(GroupPanel::label))
}
