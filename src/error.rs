//! Sticky error types.

use thiserror::Error;

use crate::types::{ElementId, ElementKind};

#[derive(Debug, Error)]
pub enum StickyError {
    /// The element sits inside a table but is not the table's header group.
    #[error("element {element} is a `{kind}` inside a table; only a `thead` can stick")]
    InvalidStructure { element: ElementId, kind: ElementKind },

    #[error("the action {0} does not exist")]
    UnknownAction(String),

    #[error("unknown edge: {0}")]
    UnknownEdge(String),

    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    /// Insertion needs a parent to insert into.
    #[error("element {0} has no parent")]
    Detached(ElementId),
}
