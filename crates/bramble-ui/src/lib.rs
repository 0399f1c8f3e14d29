//! Bramble UI
//!
//! A retained-mode control tree: controls live in an arena owned by a
//! [`Canvas`], are arranged by dock layout, drawn through a [`Skin`] onto
//! any [`Renderer`](bramble_render::Renderer) (optionally caching subtrees
//! to textures) and receive platform input through the canvas router.
//!
//! ```
//! use bramble_core::{Pos, Size};
//! use bramble_test_utils::RecordingRenderer;
//! use bramble_ui::{Canvas, EventKind, widgets::Button};
//!
//! let mut canvas = Canvas::new(RecordingRenderer::new());
//! canvas.resize(Size::new(640.0, 480.0));
//!
//! let root = canvas.root();
//! let ok = Button::create(&mut canvas, Some(root), "OK");
//! canvas.set_dock(ok, Pos::BOTTOM);
//! canvas.on(ok, EventKind::Clicked, |_, event| println!("clicked {}", event.control));
//!
//! canvas.render_canvas().unwrap();
//! assert_eq!(canvas.control(ok).unwrap().width(), 640.0);
//! ```

mod behavior;
mod canvas;
mod config;
mod control;
mod dirty;
mod drag_drop;
mod error;
mod event;
mod input;
mod layout;
mod render;
mod tooltip;
pub mod widgets;

pub use behavior::{Behavior, Panel};
pub use canvas::Canvas;
pub use config::CanvasConfig;
pub use control::{AcceleratorHandler, Control, ControlId, Lifecycle};
pub use dirty::DirtyFlags;
pub use drag_drop::Package;
pub use error::UiError;
pub use event::{ControlEvent, EventHandler, EventKind, Subscription};
pub use input::{Key, Modifiers, MouseButton, normalize_accelerator};
pub use layout::DockSide;
pub use render::{ButtonLook, SimpleSkin, Skin};

pub use bramble_core::platform::{CursorShape, Platform};
pub use bramble_core::{Color, Edges, Margin, Padding, Pos, Rect, Size};
