//! Sticky engine - Keeps elements in sight while the page scrolls.
//!
//! - [`Sticky`] - One tracked element and its fixed-position clone
//! - [`Sticker`] - Owns the tracked elements, runs the evaluation loop,
//!   stacks clones sharing an edge
//! - [`Action`] - Global operations dispatched by name
//!
//! # Example
//!
//! ```ignore
//! use spark_sticky::{Page, Sticker, StickyConfig};
//!
//! let mut page = Page::new(80, 24);
//! let body = page.body();
//! let table = page.table(body, &["ID", "Name"], &rows)?;
//!
//! let mut sticker = Sticker::new();
//! sticker.register(&mut page, table.head, StickyConfig::top())?;
//!
//! // Host loop: forward timer firings and resizes
//! for timer in page.advance(elapsed) {
//!     sticker.handle_timer(&mut page, timer);
//! }
//!
//! sticker.dispatch_named(&mut page, "destroy")?;
//! ```

mod action;
mod config;
mod item;
mod sticker;

pub use action::Action;
pub use config::{StickerOptions, StickyConfig};
pub use item::Sticky;
pub use sticker::Sticker;
