//! Test utilities for Bramble.
//!
//! - [`RecordingRenderer`] records every backend call and composites the
//!   frame (including cache-to-texture surfaces) into a flat list of visible
//!   primitives, so tests can compare what ends up on screen.
//! - [`MockPlatform`] is a controllable clock, clipboard and cursor log.
//!
//! Both are cheap handles over shared state: clone one, hand the clone to
//! the canvas and keep the original for assertions.
//!
//! ```rust
//! use bramble_core::{Color, Rect};
//! use bramble_render::Renderer;
//! use bramble_test_utils::RecordingRenderer;
//!
//! let recorder = RecordingRenderer::new();
//! let mut backend = recorder.clone();
//! backend.draw_filled_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::RED);
//!
//! assert_eq!(recorder.count_filled_rects(), 1);
//! ```

mod mock_platform;
mod recording_renderer;

pub use mock_platform::MockPlatform;
pub use recording_renderer::{Primitive, PrimitiveKind, RecordingRenderer, RenderCall};
