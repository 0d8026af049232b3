//! Terminal Pipeline
//!
//! Connects a [`Page`](crate::document::Page) and its
//! [`Sticker`](crate::sticky::Sticker) to the terminal.
//!
//! # Pipeline Architecture
//!
//! ```text
//! crossterm events → Page (scroll, viewport) → timers → Sticker → paint → DiffRenderer
//! ```
//!
//! ## Data Flow
//!
//! 1. **handle_event** - Keys scroll the page, resizes resize the viewport
//! 2. **tick** - Advances the page clock, fired timers run evaluation passes
//! 3. **render** - Paints the viewport and writes the changed rows

pub mod mount;

pub use mount::{handle_event, run, tick, LoopControl, TerminalGuard};
