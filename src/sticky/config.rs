//! Sticky configuration.

use std::time::Duration;

use crate::types::{Edge, ElementId};

/// Per-element configuration, given at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StickyConfig {
    /// Viewport edge the clone sticks to.
    pub edge: Edge,
    /// Logical container override. When `None`, the nearest table (for a
    /// table header) or the page root is used.
    pub container: Option<ElementId>,
}

impl StickyConfig {
    pub fn top() -> Self {
        Self::default()
    }

    pub fn bottom() -> Self {
        Self {
            edge: Edge::Bottom,
            container: None,
        }
    }

    pub fn with_container(mut self, container: ElementId) -> Self {
        self.container = Some(container);
        self
    }
}

/// Engine-wide options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerOptions {
    /// Period of the evaluation timer.
    pub interval: Duration,
    /// Stacking order given to every clone.
    pub z_index: i32,
    /// Class added to every clone.
    pub clone_class: String,
}

impl Default for StickerOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(10),
            z_index: 808,
            clone_class: "keepinsight-clone".to_string(),
        }
    }
}

impl StickerOptions {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}
