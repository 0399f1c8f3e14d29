//! Bramble Render
//!
//! The drawing interface the widget core consumes. Backends implement
//! [`Renderer`]; widgets and skins draw through a [`Painter`], which applies
//! the accumulated [`RenderTransform`] before forwarding to the backend.

mod painter;
mod renderer;
mod transform;

pub use painter::Painter;
pub use renderer::{CacheKey, Font, Renderer, SharedRenderer, Texture};
pub use transform::RenderTransform;
