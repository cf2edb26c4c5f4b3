//! Read-only tree traits used by the namespace and its presentation layer

use crate::tree::path::SEPARATOR;
use crate::tree::{Node, NodeId, NodeKind};
use std::collections::{HashSet, VecDeque};

/// A hierarchical, read-only view over namespace nodes
///
/// Implementations provide the navigation primitives; the derived methods
/// build paths, depths and ancestry on top of them.
///
/// # Example
///
/// ```ignore
/// fn print_tree<T: Tree>(tree: &T) {
///     for id in tree.walk(TraversalOrder::PreOrder) {
///         let depth = tree.depth(id);
///         println!("{:indent$}{}", "", tree.name(id).unwrap(), indent = depth * 2);
///     }
/// }
/// ```
pub trait Tree {
    /// Get the root node ID (always exists)
    fn root(&self) -> NodeId;

    /// Get a node by its ID
    ///
    /// Returns `None` for unknown or deleted IDs.
    fn get(&self, id: NodeId) -> Option<&Node>;

    /// Number of live nodes, root included
    fn node_count(&self) -> usize;

    /// Get the parent of a node
    ///
    /// Returns `None` for the root.
    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent()
    }

    /// Iterate over children of a node in sibling order
    ///
    /// Returns an empty iterator for leaf nodes or invalid IDs.
    fn children(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        match self.get(id) {
            Some(node) => Box::new(node.children().iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Returns false for invalid IDs.
    fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id)
            .map(|n| n.kind() == NodeKind::Leaf)
            .unwrap_or(false)
    }

    /// Returns false for invalid IDs.
    fn is_container(&self, id: NodeId) -> bool {
        self.get(id)
            .map(|n| n.kind() == NodeKind::Container)
            .unwrap_or(false)
    }

    fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.name())
    }

    /// Absolute path of a node, e.g. `/docs/report.txt`
    ///
    /// The root is `/`. Returns `None` for invalid IDs.
    fn path(&self, id: NodeId) -> Option<String> {
        self.get(id)?;
        let mut components: Vec<&str> = self
            .ancestors(id)
            .into_iter()
            .rev()
            .skip(1)
            .filter_map(|a| self.name(a))
            .collect();
        if id != self.root() {
            components.push(self.name(id)?);
        }

        let mut path = String::new();
        for component in components {
            path.push(SEPARATOR);
            path.push_str(component);
        }
        if path.is_empty() {
            path.push(SEPARATOR);
        }
        Some(path)
    }

    /// Get the depth of a node (root = 0)
    fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len()
    }

    fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Get all ancestors of a node, from parent to root
    fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            ancestors.push(parent_id);
            current = self.parent(parent_id);
        }
        ancestors
    }

    /// Check if `ancestor` is `node` itself or lies above it
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}

/// Traversal order for walking the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Visit parent before children (top-down)
    PreOrder,
    /// Visit children before parent (bottom-up)
    PostOrder,
    /// Visit level by level (breadth-first)
    BreadthFirst,
}

/// Traversal and search helpers, implemented for every `Tree`
pub trait TreeTraversal: Tree {
    /// Walk the tree from the root in the specified order
    fn walk(&self, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, self.root(), order)
    }

    /// Walk the subtree rooted at `start`
    fn walk_from(&self, start: NodeId, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, start, order)
    }

    /// All files
    fn leaves(&self) -> Vec<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|&id| self.is_leaf(id))
            .collect()
    }

    /// All folders, root included
    fn containers(&self) -> Vec<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|&id| self.is_container(id))
            .collect()
    }

    /// Find nodes matching a predicate
    fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Node) -> bool,
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|&id| self.get(id).map(&predicate).unwrap_or(false))
            .collect()
    }

    /// Shallowest node with the given name
    fn find_by_name(&self, name: &str) -> Option<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::BreadthFirst)
            .find(|&id| self.name(id) == Some(name))
    }

    fn find_all_by_name(&self, name: &str) -> Vec<NodeId>
    where
        Self: Sized,
    {
        self.find(|n| n.name() == name)
    }
}

impl<T: Tree> TreeTraversal for T {}

/// Iterator for traversing a tree in different orders
pub struct TreeWalker<'a, T: Tree + ?Sized> {
    tree: &'a T,
    order: TraversalOrder,
    pending: VecDeque<NodeId>,
    expanded: HashSet<NodeId>,
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    /// Create a new tree walker starting from the given node
    ///
    /// Unknown start IDs yield nothing.
    pub fn new(tree: &'a T, start: NodeId, order: TraversalOrder) -> Self {
        let mut pending = VecDeque::new();
        if tree.get(start).is_some() {
            pending.push_back(start);
        }
        Self {
            tree,
            order,
            pending,
            expanded: HashSet::new(),
        }
    }

    fn next_preorder(&mut self) -> Option<NodeId> {
        let current = self.pending.pop_back()?;

        // Reverse so the first child is popped next
        let children: Vec<_> = self.tree.children(current).collect();
        self.pending.extend(children.into_iter().rev());

        Some(current)
    }

    fn next_postorder(&mut self) -> Option<NodeId> {
        while let Some(&current) = self.pending.back() {
            if !self.expanded.insert(current) {
                self.pending.pop_back();
                return Some(current);
            }

            let children: Vec<_> = self.tree.children(current).collect();
            self.pending.extend(children.into_iter().rev());
        }
        None
    }

    fn next_breadthfirst(&mut self) -> Option<NodeId> {
        let current = self.pending.pop_front()?;
        self.pending.extend(self.tree.children(current));
        Some(current)
    }
}

impl<'a, T: Tree + ?Sized> Iterator for TreeWalker<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        match self.order {
            TraversalOrder::PreOrder => self.next_preorder(),
            TraversalOrder::PostOrder => self.next_postorder(),
            TraversalOrder::BreadthFirst => self.next_breadthfirst(),
        }
    }
}
