//! Trellis: a retained-mode widget engine for overlay UIs.
//!
//! Widgets live in an arena [`Tree`]; parents own their children and children
//! refer back to their parent by id. A host drives two entry points per tick:
//! an update that turns a level-triggered pointer sample into edge-triggered
//! events and dispatches them from the root, and a render that walks the tree
//! onto an abstract drawing [`Surface`](render::Surface).
//!
//! # Quick Start
//!
//! - [`App`] and [`Session`] - the per-tick entry points
//! - [`Tree`] - the node arena, geometry and dispatch
//! - [`Widget`] - the trait implemented by all widgets
//! - [`widgets::Menu`] - the draggable, resizable container
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Expanse, LineSegment)
//! - [`widgets`] - Built-in widget implementations
//! - [`backend`] - A recording surface for tests and headless hosts

#![warn(missing_docs)]

/// Per-tick host entry points.
pub mod app;
/// Drawing surface implementations.
pub mod backend;
/// Menu configuration.
pub mod config;
/// Widget contexts.
pub mod context;
/// Error types.
pub mod error;
/// Pointer events.
pub mod event;
/// Node identifiers.
pub mod id;
/// Edge detection over pointer samples.
pub mod input;
/// Vertical stacking.
pub mod layout;
/// Node data.
pub mod node;
/// Drawing surface trait and clip-tracking renderer.
pub mod render;
/// Colors and alignment.
pub mod style;
/// The node arena.
pub mod tree;
/// The widget trait.
pub mod widget;
/// Built-in widgets.
pub mod widgets;

pub use app::{App, Session};
pub use context::{Context, ViewContext};
pub use error::{Error, Result};
pub use id::{NodeId, TypedId};
pub use tree::Tree;
pub use trellis_geom as geom;
pub use widget::{EventOutcome, Widget};
