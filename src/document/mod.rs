//! Document - The element tree the sticky engine works against.
//!
//! The engine never owns elements. It asks a [`Document`] about ancestry and
//! geometry, and tells it to clone, insert, place, show and hide elements.
//! The same collaborator provides the two scheduling primitives the engine
//! needs: a recurring timer and a viewport resize subscription.
//!
//! - [`Document`] - The collaborator trait
//! - [`Page`] - In-memory document laid out with Taffy
//! - [`IntervalTimers`] - Virtual-clock timers used by [`Page`]

mod layout;
mod page;
mod timers;

pub use layout::{PageLayout, compute_page_layout};
pub use page::{Page, TableHandle};
pub use timers::IntervalTimers;

use std::time::Duration;

use crate::error::StickyError;
use crate::types::{ElementId, ElementKind, ListenerId, Placement, Point, TimerId};

/// Everything the sticky engine consumes from the page it runs on.
///
/// Geometry queries must reflect the layout at the time of the call. Queries
/// on unknown elements return neutral values (`None`, empty, `0.0`).
pub trait Document {
    // -------------------------------------------------------------------------
    // Ancestry
    // -------------------------------------------------------------------------

    /// The page root.
    fn root(&self) -> ElementId;

    fn kind(&self, el: ElementId) -> Option<ElementKind>;

    fn parent(&self, el: ElementId) -> Option<ElementId>;

    /// Children in document order.
    fn children(&self, el: ElementId) -> Vec<ElementId>;

    fn contains(&self, el: ElementId) -> bool {
        self.kind(el).is_some()
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Document-relative position of the element's border box.
    fn offset(&self, el: ElementId) -> Point;

    fn width(&self, el: ElementId) -> f32;

    fn outer_height(&self, el: ElementId) -> f32;

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Deep-clone an element. The clone is detached until inserted.
    fn clone_element(&mut self, el: ElementId) -> Result<ElementId, StickyError>;

    /// Insert a detached element immediately after `reference`.
    fn insert_after(&mut self, el: ElementId, reference: ElementId) -> Result<(), StickyError>;

    /// Remove an element and its subtree from the document.
    fn remove(&mut self, el: ElementId);

    fn add_class(&mut self, el: ElementId, class: &str);

    /// Toggle rendering entirely (`display`).
    fn set_shown(&mut self, el: ElementId, shown: bool);

    /// Toggle painting while keeping the layout box (`visibility`).
    fn set_visible(&mut self, el: ElementId, visible: bool);

    /// Take the element out of flow, fixed to the viewport, with no top
    /// margin and the given stacking order.
    fn set_fixed(&mut self, el: ElementId, z_index: i32);

    /// Position a fixed element against the viewport.
    fn place(&mut self, el: ElementId, placement: Placement);

    fn set_width(&mut self, el: ElementId, width: f32);

    // -------------------------------------------------------------------------
    // Viewport
    // -------------------------------------------------------------------------

    fn scroll_top(&self) -> f32;

    fn viewport_height(&self) -> f32;

    fn scroll_bottom(&self) -> f32 {
        self.scroll_top() + self.viewport_height()
    }

    // -------------------------------------------------------------------------
    // Scheduling
    // -------------------------------------------------------------------------

    fn set_interval(&mut self, period: Duration) -> TimerId;

    fn clear_interval(&mut self, id: TimerId);

    fn subscribe_resize(&mut self) -> ListenerId;

    fn unsubscribe_resize(&mut self, id: ListenerId);
}
