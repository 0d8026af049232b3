//! # spark-sticky
//!
//! Keeps page elements in sight while the page scrolls.
//!
//! A registered element gets a fixed-position clone. While the element's
//! container is partly on screen but the element itself has scrolled past
//! the viewport's top (or bottom) edge, the clone is shown pinned to that
//! edge and the original is made invisible, keeping its layout space.
//! Clones pinned to the same edge stack in registration order.
//!
//! ## Architecture
//!
//! The engine works against a [`Document`] collaborator: ancestry, geometry,
//! mutation, viewport and scheduling. [`Page`] is the bundled in-memory
//! document, stored as parallel arrays and laid out with Taffy, with its
//! scroll position and viewport size held in signals.
//!
//! ```text
//! Page (arrays) → Taffy layout → Sticker pass → paint → DiffRenderer
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (ElementId, ElementKind, Edge, ElementFlags, etc.)
//! - [`document`] - Document trait, Page, layout, virtual-clock timers
//! - [`sticky`] - Tracked elements, the Sticker, named actions
//! - [`renderer`] - FrameBuffer painting and diff rendering
//! - [`pipeline`] - Terminal event loop

pub mod document;
pub mod error;
pub mod pipeline;
pub mod renderer;
pub mod sticky;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::StickyError;

pub use document::{Document, IntervalTimers, Page, TableHandle};

pub use sticky::{Action, Sticker, StickerOptions, Sticky, StickyConfig};

pub use renderer::{paint, Attr, Cell, DiffRenderer, FrameBuffer};

pub use pipeline::{handle_event, run, tick, LoopControl};
