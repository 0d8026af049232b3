//! Terminal renderer.
//!
//! - [`paint`] - Page viewport into a [`FrameBuffer`]
//! - [`DiffRenderer`] - Writes only the rows that changed since the last frame

mod buffer;
mod diff;

pub use buffer::{paint, Attr, Cell, FrameBuffer};
pub use diff::DiffRenderer;
