//! # HITMARK UI
//!
//! Drawing primitives for the hit-marker overlay.
//!
//! ```text
//! Lifecycle pass → DrawSurface calls → host backend (or CommandBuffer)
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod render;
pub mod style;

pub use render::{CommandBuffer, DrawSurface, RenderCommand};
pub use style::Color;
