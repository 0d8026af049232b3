//! Core types for spark-sticky.
//!
//! Value types shared by the document model, the sticky engine and the
//! terminal host. Elements are NOT objects: an [`ElementId`] is an index into
//! the document's parallel arrays.

use std::fmt;
use std::str::FromStr;

use crate::error::StickyError;

// =============================================================================
// Element Identity
// =============================================================================

/// Index of an element in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl ElementId {
    /// The raw array index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Element Kind
// =============================================================================

/// Structural role of an element.
///
/// Tables get their own kinds because their clones need special handling:
/// a header only lines up with its columns while it lives inside the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    /// Page root.
    Body,
    /// Generic block of text or other blocks.
    #[default]
    Block,
    Table,
    /// Header-row group of a table.
    TableHead,
    /// Body-row group of a table.
    TableBody,
    TableRow,
    HeaderCell,
    DataCell,
}

impl ElementKind {
    /// Cells take part in table column sizing.
    #[inline]
    pub const fn is_cell(self) -> bool {
        matches!(self, Self::HeaderCell | Self::DataCell)
    }

    /// Table sections hold rows.
    #[inline]
    pub const fn is_table_section(self) -> bool {
        matches!(self, Self::TableHead | Self::TableBody)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Body => "body",
            Self::Block => "block",
            Self::Table => "table",
            Self::TableHead => "thead",
            Self::TableBody => "tbody",
            Self::TableRow => "tr",
            Self::HeaderCell => "th",
            Self::DataCell => "td",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Edge
// =============================================================================

/// Viewport edge a clone sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Edge {
    #[default]
    Top,
    Bottom,
}

impl FromStr for Edge {
    type Err = StickyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(StickyError::UnknownEdge(other.to_string())),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Bottom => f.write_str("bottom"),
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Document-relative position, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub left: f32,
    pub top: f32,
}

impl Point {
    pub const ZERO: Self = Self { left: 0.0, top: 0.0 };

    pub const fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// Where a fixed element sits relative to the viewport.
///
/// `offset` is measured from the viewport edge named by `edge`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub edge: Edge,
    pub offset: f32,
    pub left: f32,
    pub width: f32,
}

// =============================================================================
// Scheduling Handles
// =============================================================================

/// Handle to a recurring timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Handle to a viewport resize subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

// =============================================================================
// Element Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Display state of an element.
    ///
    /// `HIDDEN` removes the element from rendering (and from flow unless it
    /// is fixed). `INVISIBLE` keeps the layout box but paints nothing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ElementFlags: u8 {
        const NONE = 0;
        const HIDDEN = 1 << 0;
        const INVISIBLE = 1 << 1;
        const FIXED = 1 << 2;
    }
}

// =============================================================================
// Tests
// =============================================================================
