//! Bramble Core
//!
//! Value types and shared services for the Bramble widget toolkit: geometry,
//! colours, the generational arena that backs the control tree, logging,
//! profiling and the platform services interface.

pub mod alloc;
pub mod color;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod platform;
pub mod profiling;

pub use color::Color;
pub use geometry::{Edges, Margin, Padding, Pos, Rect, Size};
