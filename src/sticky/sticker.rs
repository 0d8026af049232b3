//! Sticker - Decides which clones show, and where.
//!
//! # Pattern
//!
//! - Registering the first element starts monitoring: one recurring timer
//!   and one resize subscription, shared by every tracked element
//! - Each timer firing runs one evaluation pass, skipped when the page has
//!   not scrolled since the last pass
//! - A resize re-applies table column widths to every clone
//! - Removing the last element, or the `destroy` action, stops monitoring
//!
//! # Evaluation pass
//!
//! Top-edge items are visited in registration order with a running stack
//! offset starting at 0. An item's window opens when the scroll position
//! reaches `source_top - stack_offset` (so it docks flush under the clones
//! already showing) and closes `container_height - clone_height` later, once
//! the container's bottom has scrolled by. A showing item adds its clone
//! height to the stack offset.
//!
//! ```text
//! scroll_top ∈ [source_top - offset, source_top - offset + container_h - clone_h)
//! ```
//!
//! Bottom-edge items mirror this against the scroll bottom, measured from the
//! viewport's bottom edge: the effective scroll bottom for an item is the
//! real one minus the bottom stack offset, and the window is
//! `[container_top + clone_h, source_top + clone_h)`.
//!
//! Polling is deliberate: it needs no fine-grained reflow observation. A host
//! that can observe layout changes directly may call [`Sticker::evaluate`]
//! from those notifications instead; the windows and stacking stay the same.

use tracing::{debug, trace};

use super::action::Action;
use super::config::{StickerOptions, StickyConfig};
use super::item::Sticky;
use crate::document::Document;
use crate::error::StickyError;
use crate::types::{Edge, ElementId, ListenerId, TimerId};

/// Active subscriptions while monitoring.
#[derive(Debug, Clone, Copy)]
struct Monitor {
    timer: TimerId,
    resize: ListenerId,
}

/// Owns the tracked elements and runs the evaluation loop.
#[derive(Debug, Default)]
pub struct Sticker {
    items: Vec<Sticky>,
    options: StickerOptions,
    monitor: Option<Monitor>,
    /// Scroll position seen by the last completed pass.
    last_scroll_top: Option<f32>,
    /// Set while a pass is running.
    sticking: bool,
}

impl Sticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: StickerOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    // =========================================================================
    // State Access
    // =========================================================================

    pub fn items(&self) -> &[Sticky] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn options(&self) -> &StickerOptions {
        &self.options
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitor.is_some()
    }

    /// Whether a pass is in flight. Only observable from inside a pass,
    /// e.g. by a host that calls back into the sticker from a [`Document`]
    /// mutation; such reentrant calls to [`Sticker::evaluate`] are ignored.
    pub fn is_evaluating(&self) -> bool {
        self.sticking
    }

    /// Timer driving the evaluation passes, while monitoring.
    pub fn timer(&self) -> Option<TimerId> {
        self.monitor.map(|m| m.timer)
    }

    pub fn last_scroll_top(&self) -> Option<f32> {
        self.last_scroll_top
    }

    /// The tracked item for a source element.
    pub fn find(&self, source: ElementId) -> Option<&Sticky> {
        self.items.iter().find(|item| item.source() == source)
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Track an element. Returns the clone standing in for it.
    ///
    /// Starts monitoring if needed. A failed registration changes nothing:
    /// the item list, the document and the monitoring state stay as they were.
    pub fn register<D: Document>(
        &mut self,
        doc: &mut D,
        source: ElementId,
        config: StickyConfig,
    ) -> Result<ElementId, StickyError> {
        let sticky = Sticky::create(doc, source, config, &self.options)?;
        let clone = sticky.clone_el();
        self.items.push(sticky);
        // The new item has not been evaluated yet
        self.last_scroll_top = None;
        self.start_monitoring(doc);
        Ok(clone)
    }

    /// Track several elements in order, stopping at the first failure.
    /// Elements registered before the failure stay registered.
    pub fn register_all<D: Document>(
        &mut self,
        doc: &mut D,
        sources: &[ElementId],
        config: StickyConfig,
    ) -> Result<Vec<ElementId>, StickyError> {
        sources
            .iter()
            .map(|&source| self.register(doc, source, config))
            .collect()
    }

    /// Stop tracking one element. Monitoring stops with the last element.
    ///
    /// Returns `false` if the element was not tracked.
    pub fn unregister<D: Document>(&mut self, doc: &mut D, source: ElementId) -> bool {
        let Some(position) = self.items.iter().position(|item| item.source() == source) else {
            return false;
        };
        let sticky = self.items.remove(position);
        sticky.tear_down(doc);
        // Items below may need to move up
        self.last_scroll_top = None;
        if self.items.is_empty() {
            self.stop_monitoring(doc);
        }
        true
    }

    // =========================================================================
    // Monitoring
    // =========================================================================

    /// Subscribe to resizes and start the evaluation timer. No-op if already
    /// monitoring.
    pub fn start_monitoring<D: Document>(&mut self, doc: &mut D) {
        if self.monitor.is_some() {
            return;
        }
        let resize = doc.subscribe_resize();
        let timer = doc.set_interval(self.options.interval);
        self.monitor = Some(Monitor { timer, resize });
        debug!(interval = ?self.options.interval, "sticker monitoring started");
    }

    /// Unsubscribe and cancel the timer. No-op if not monitoring.
    pub fn stop_monitoring<D: Document>(&mut self, doc: &mut D) {
        let Some(monitor) = self.monitor.take() else {
            return;
        };
        doc.unsubscribe_resize(monitor.resize);
        doc.clear_interval(monitor.timer);
        debug!("sticker monitoring stopped");
    }

    /// Timer entry point. Runs a pass if `timer` is this sticker's timer.
    pub fn handle_timer<D: Document>(&mut self, doc: &mut D, timer: TimerId) {
        if self.timer() == Some(timer) {
            self.evaluate(doc);
        }
    }

    /// Resize entry point. Re-derives column widths for every clone.
    pub fn handle_resize<D: Document>(&mut self, doc: &mut D) {
        if self.monitor.is_none() {
            return;
        }
        for item in &self.items {
            item.refresh(doc);
        }
        // Geometry moved under an unchanged scroll position
        self.last_scroll_top = None;
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Run one evaluation pass.
    ///
    /// Skipped while another pass is in flight, and when the scroll position
    /// matches the last evaluated one.
    pub fn evaluate<D: Document>(&mut self, doc: &mut D) {
        if self.sticking {
            return;
        }

        let scroll_top = doc.scroll_top();
        if self.last_scroll_top == Some(scroll_top) {
            return;
        }

        self.sticking = true;

        let scroll_bottom = scroll_top + doc.viewport_height();
        let mut top_offset = 0.0;
        let mut bottom_offset = 0.0;

        for item in &self.items {
            let source_top = doc.offset(item.source()).top;
            let clone_height = item.clone_height(doc);

            match item.edge() {
                Edge::Top => {
                    let start = source_top - top_offset;
                    let end = start + (item.container_height(doc) - clone_height);

                    if scroll_top >= start && scroll_top < end {
                        trace!(source = %item.source(), offset = top_offset, "show (top)");
                        item.show_at(doc, Edge::Top, top_offset);
                        top_offset += clone_height;
                    } else {
                        item.hide(doc);
                    }
                }
                Edge::Bottom => {
                    let effective_bottom = scroll_bottom - bottom_offset;
                    let start = doc.offset(item.container()).top + clone_height;
                    let end = source_top + clone_height;

                    if effective_bottom >= start && effective_bottom < end {
                        trace!(source = %item.source(), offset = bottom_offset, "show (bottom)");
                        item.show_at(doc, Edge::Bottom, bottom_offset);
                        bottom_offset += clone_height;
                    } else {
                        item.hide(doc);
                    }
                }
            }
        }

        self.sticking = false;
        self.last_scroll_top = Some(scroll_top);
    }

    // =========================================================================
    // Teardown & Actions
    // =========================================================================

    /// Tear down every item and forget them.
    pub fn destroy_all<D: Document>(&mut self, doc: &mut D) {
        for item in self.items.drain(..) {
            item.tear_down(doc);
        }
        self.last_scroll_top = None;
    }

    /// Tear everything down and stop monitoring.
    pub fn reset<D: Document>(&mut self, doc: &mut D) {
        self.destroy_all(doc);
        self.stop_monitoring(doc);
    }

    pub fn dispatch<D: Document>(&mut self, doc: &mut D, action: Action) {
        match action {
            Action::Destroy => self.reset(doc),
        }
    }

    /// Dispatch an action by name. Unknown names fail with
    /// [`StickyError::UnknownAction`] and change nothing.
    pub fn dispatch_named<D: Document>(
        &mut self,
        doc: &mut D,
        name: &str,
    ) -> Result<(), StickyError> {
        let action: Action = name.parse()?;
        self.dispatch(doc, action);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
