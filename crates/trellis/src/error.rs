use std::{any::type_name, result::Result as StdResult};

use thiserror::Error;

use crate::{geom, id::NodeId};

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The node is not present in the arena.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The node already has a parent.
    #[error("node already attached: {0:?}")]
    AlreadyAttached(NodeId),

    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} to {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Prospective parent.
        parent: NodeId,
        /// Prospective child.
        child: NodeId,
    },

    /// The widget slot is empty because the widget is already executing.
    #[error("widget is already borrowed: {0:?}")]
    WidgetBorrowed(NodeId),

    /// Typed widget access found a different widget type.
    #[error("expected widget type {expected}")]
    WidgetType {
        /// Name of the requested type.
        expected: &'static str,
    },

    #[error("invalid operation: {0}")]
    /// The operation is not permitted on this node.
    InvalidOperation(String),

    #[error("render: {0}")]
    /// A drawing surface failed.
    Render(String),

    #[error("config: {0}")]
    /// Configuration could not be loaded.
    Config(String),

    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
}

impl Error {
    /// Construct a widget type mismatch error for `W`.
    pub fn widget_type<W: ?Sized>() -> Self {
        Self::WidgetType {
            expected: type_name::<W>(),
        }
    }
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
