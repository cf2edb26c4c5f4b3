//! Core node types for the namespace tree

use derive_more::Display;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a namespace
///
/// Internally an index into the arena owned by [`crate::tree::Namespace`].
/// Handles are allocated once per insert and never reused, even after the
/// node they named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node always has ID 0
    pub const ROOT: NodeId = NodeId(0);

    /// Create a new NodeId from a usize
    pub const fn new(id: usize) -> Self {
        NodeId(id)
    }

    /// Get the inner usize value
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// The kind of an entry in the namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    /// A folder - may hold children
    #[display(fmt = "folder")]
    Container,
    /// A file - holds content, never children
    #[display(fmt = "file")]
    Leaf,
}

impl NodeKind {
    /// Returns true if this is a container node
    pub const fn is_container(self) -> bool {
        matches!(self, NodeKind::Container)
    }

    /// Returns true if this is a leaf node
    pub const fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Leaf)
    }

    /// Label used as the first half of the sibling sort key.
    ///
    /// `"file" < "folder"`, so leaves sort ahead of containers.
    pub const fn label(self) -> &'static str {
        match self {
            NodeKind::Container => "folder",
            NodeKind::Leaf => "file",
        }
    }
}

/// A single entry in the namespace
///
/// A node is a dumb structural record: it never checks name uniqueness or
/// acyclicity. [`crate::tree::Namespace`] is the only code that mutates the
/// parent/child links.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) content: Option<String>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    /// Create a new, unattached node
    ///
    /// Containers drop any supplied content.
    pub(crate) fn new(
        id: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
        content: Option<String>,
    ) -> Self {
        let content = match kind {
            NodeKind::Container => None,
            NodeKind::Leaf => content,
        };
        Self {
            id,
            name: name.into(),
            kind,
            content,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's name (not full path)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Raw file content; always `None` for containers
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Direct children in sibling order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Enclosing container, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns true if this is a container node
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Returns true if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    /// Append a child handle. Ordering is restored separately by the owner.
    pub(crate) fn add_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// Remove a direct child handle, returning whether it was present
    pub(crate) fn remove_child(&mut self, child: NodeId) -> bool {
        match self.children.iter().position(|&id| id == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {} ({})>", self.kind, self.name, self.id)
    }
}
