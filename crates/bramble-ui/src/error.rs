use crate::control::ControlId;
use std::fmt;

/// Errors surfaced by the control tree.
///
/// Misuse that only indicates a bug in the caller (disposing twice, mutating
/// through a stale handle) is not represented here: it trips a debug
/// assertion and degrades to a logged no-op in release builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// Neither the control, its ancestors nor the canvas provide a skin.
    MissingSkin { control: ControlId },
    /// The handle does not refer to a live control.
    StaleControl { control: ControlId },
    /// `panel` cannot become the inner panel of `container`.
    InvalidInnerPanel {
        container: ControlId,
        panel: ControlId,
    },
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::MissingSkin { control } => {
                write!(f, "No skin available to render control {control}")
            }
            UiError::StaleControl { control } => {
                write!(f, "Control {control} has been disposed")
            }
            UiError::InvalidInnerPanel { container, panel } => write!(
                f,
                "Control {panel} is not a direct child of {container} and cannot be its inner panel"
            ),
        }
    }
}

impl std::error::Error for UiError {}
