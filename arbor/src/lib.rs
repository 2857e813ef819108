//! Headless state engine for interactive tree widgets.
//!
//! The crate owns the state a tree view renders from (selection, tri-state
//! checking, expansion, search matches) and the structural algorithms behind
//! drag-and-drop reordering. Rendering and input capture stay in the view
//! layer, which feeds row geometry and raw input back through
//! [`TreeStateEngine`].

pub mod check;
pub mod config;
pub mod drag;
pub mod engine;
pub mod error;
pub mod event;
pub mod forest;
pub mod geometry;
pub mod node;
pub mod search;
pub mod traverse;

pub use config::{DropZone, TreeConfig};
pub use drag::DropPosition;
pub use engine::{Deferred, TreeStateEngine};
pub use error::TreeError;
pub use event::{EventName, Modifiers, MouseButton, NodeSet, RawEvent, TreeEvent};
pub use forest::Forest;
pub use geometry::Rect;
pub use node::{ForestId, Node, NodeId, TreeNode};
pub use traverse::Walk;
