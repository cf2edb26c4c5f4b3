//! Core namespace tree
//!
//! This module provides the node model, the path helpers and the
//! [`Namespace`] that owns every node and enforces the tree invariants.

mod error;
mod namespace;
mod node;
pub mod path;
mod traits;

pub use error::{ErrorKind, Result, TreeError};
pub use namespace::{Entry, Namespace, EMPTY_FILE};
pub use node::{Node, NodeId, NodeKind};
pub use traits::{TraversalOrder, Tree, TreeTraversal, TreeWalker};

/// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        Entry, ErrorKind, Namespace, Node, NodeId, NodeKind, TraversalOrder, Tree, TreeError,
        TreeTraversal, EMPTY_FILE,
    };
}
