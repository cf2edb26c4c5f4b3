//! The namespace tree: path-based operations over an arena of nodes

use crate::tree::error::{Result, TreeError};
use crate::tree::path;
use crate::tree::{Node, NodeId, NodeKind, TraversalOrder, Tree, TreeTraversal};
use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Placeholder returned by [`Namespace::read`] for a file with no content
pub const EMPTY_FILE: &str = "The file is empty.";

/// One line of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry {
    pub kind: NodeKind,
    pub name: String,
}

impl Entry {
    fn of(node: &Node) -> Self {
        Self {
            kind: node.kind(),
            name: node.name().to_string(),
        }
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}

/// An in-memory hierarchy of folders and files
///
/// The arena owns every node; parent and child links are plain handles.
/// Deleted slots are tombstoned, so a [`NodeId`] is never handed out twice.
///
/// # Example
///
/// ```
/// use vtree::tree::{Namespace, NodeKind};
///
/// let mut tree = Namespace::new();
/// tree.insert("/", "docs", NodeKind::Container, None).unwrap();
/// tree.insert("/docs", "todo.txt", NodeKind::Leaf, Some("milk".into())).unwrap();
/// assert_eq!(tree.read("/docs/todo.txt").unwrap(), "milk");
/// assert_eq!(tree.size(None).unwrap(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Namespace {
    nodes: Vec<Option<Node>>,
    live: usize,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    /// Create a namespace holding only the root folder `/`
    pub fn new() -> Self {
        let root = Node::new(NodeId::ROOT, "/", NodeKind::Container, None);
        Self {
            nodes: vec![Some(root)],
            live: 1,
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        // Handles stored in the tree always point at live slots
        self.nodes[id.get()]
            .as_ref()
            .unwrap_or_else(|| unreachable!("dangling {}", id))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.get()]
            .as_mut()
            .unwrap_or_else(|| unreachable!("dangling {}", id))
    }

    /// Walk `path` from the root, one linear child scan per segment
    pub fn resolve(&self, path: &str) -> Option<NodeId> {
        if path::is_root(path) {
            return Some(NodeId::ROOT);
        }
        let mut current = NodeId::ROOT;
        for segment in path::segments(path) {
            current = self
                .node(current)
                .children()
                .iter()
                .copied()
                .find(|&child| self.node(child).name() == segment)?;
        }
        trace!("resolved '{}' to {}", path, current);
        Some(current)
    }

    /// Like [`Namespace::resolve`], failing with `NotFound`
    pub fn lookup(&self, path: &str) -> Result<&Node> {
        self.resolve(path)
            .map(|id| self.node(id))
            .ok_or_else(|| TreeError::NotFound {
                path: path.to_string(),
            })
    }

    fn child_named(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.node(parent)
            .children()
            .iter()
            .copied()
            .find(|&child| self.node(child).name() == name)
    }

    /// Restore `(kind label, name)` order among the children of `id`
    ///
    /// Unknown or deleted IDs are ignored.
    pub fn sort_children(&mut self, id: NodeId) {
        if self.get(id).is_none() {
            return;
        }
        let mut children = std::mem::take(&mut self.node_mut(id).children);
        children.sort_by(|&a, &b| {
            let a = self.node(a);
            let b = self.node(b);
            (a.kind().label(), a.name()).cmp(&(b.kind().label(), b.name()))
        });
        self.node_mut(id).children = children;
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).add_child(child);
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.node(child).parent() {
            self.node_mut(parent).remove_child(child);
            self.node_mut(child).parent = None;
        }
    }

    /// Create a folder or file named `name` under `parent_path`
    ///
    /// Folders ignore `content`. Returns the new node's ID.
    pub fn insert(
        &mut self,
        parent_path: &str,
        name: &str,
        kind: NodeKind,
        content: Option<String>,
    ) -> Result<NodeId> {
        let parent = self
            .resolve(parent_path)
            .ok_or_else(|| TreeError::ParentNotFound {
                path: parent_path.to_string(),
            })?;
        if self.node(parent).is_leaf() {
            return Err(TreeError::ParentNotContainer {
                path: parent_path.to_string(),
            });
        }
        path::validate_name(name)?;
        if self.child_named(parent, name).is_some() {
            return Err(TreeError::NameCollision {
                name: name.to_string(),
                parent: parent_path.to_string(),
            });
        }

        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Some(Node::new(id, name, kind, content)));
        self.live += 1;
        self.attach(parent, id);
        self.sort_children(parent);

        debug!("inserted {} '{}' under '{}' as {}", kind, name, parent_path, id);
        Ok(id)
    }

    /// Remove the node at `path` together with its whole subtree
    pub fn delete(&mut self, path: &str) -> Result<()> {
        let id = self.resolve(path).ok_or_else(|| TreeError::NotFound {
            path: path.to_string(),
        })?;
        if id == NodeId::ROOT {
            return Err(TreeError::RootDeletionForbidden);
        }

        let doomed: Vec<NodeId> = self.walk_from(id, TraversalOrder::PostOrder).collect();
        self.detach(id);
        for victim in &doomed {
            self.nodes[victim.get()] = None;
        }
        self.live -= doomed.len();

        debug!("deleted '{}' ({} nodes)", path, doomed.len());
        Ok(())
    }

    /// Relocate the node at `source_path` into the folder at `dest_path`
    ///
    /// The moved node keeps its ID, content and subtree.
    pub fn move_node(&mut self, source_path: &str, dest_path: &str) -> Result<()> {
        let (source, dest) = match (self.resolve(source_path), self.resolve(dest_path)) {
            (Some(source), Some(dest)) => (source, dest),
            _ => {
                return Err(TreeError::InvalidSourceOrDest {
                    source: source_path.to_string(),
                    dest: dest_path.to_string(),
                })
            }
        };
        if self.node(dest).is_leaf() {
            return Err(TreeError::DestNotContainer {
                path: dest_path.to_string(),
            });
        }
        if self.is_ancestor_or_self(source, dest) {
            return Err(TreeError::CyclicMove {
                source: source_path.to_string(),
                dest: dest_path.to_string(),
            });
        }
        let name = self.node(source).name().to_string();
        if self.child_named(dest, &name).is_some() {
            return Err(TreeError::NameCollision {
                name,
                parent: dest_path.to_string(),
            });
        }

        self.detach(source);
        self.attach(dest, source);
        self.sort_children(dest);

        debug!("moved '{}' into '{}'", source_path, dest_path);
        Ok(())
    }

    /// Change the name of the node at `path` in place
    pub fn rename(&mut self, path: &str, new_name: &str) -> Result<()> {
        let id = self.resolve(path).ok_or_else(|| TreeError::NotFound {
            path: path.to_string(),
        })?;
        let Some(parent) = self.node(id).parent() else {
            return Err(TreeError::RootRenameForbidden);
        };
        path::validate_name(new_name)?;
        if let Some(existing) = self.child_named(parent, new_name) {
            if existing != id {
                return Err(TreeError::NameCollision {
                    name: new_name.to_string(),
                    parent: self.path(parent).unwrap_or_default(),
                });
            }
        }

        self.node_mut(id).name = new_name.to_string();
        self.sort_children(parent);

        debug!("renamed '{}' to '{}'", path, new_name);
        Ok(())
    }

    /// List a folder's children, or a file as itself
    pub fn list(&self, path: &str) -> Result<Vec<Entry>> {
        let node = self.lookup(path)?;
        let entries = match node.kind() {
            NodeKind::Container => node
                .children()
                .iter()
                .map(|&child| Entry::of(self.node(child)))
                .collect(),
            NodeKind::Leaf => vec![Entry::of(node)],
        };
        Ok(entries)
    }

    /// Raw content of the file at `path`; `None` if it was never written
    pub fn content(&self, path: &str) -> Result<Option<&str>> {
        let node = self.lookup(path)?;
        match node.kind() {
            NodeKind::Container => Err(TreeError::NotALeaf {
                path: path.to_string(),
            }),
            NodeKind::Leaf => Ok(node.content()),
        }
    }

    /// Text of the file at `path`, or [`EMPTY_FILE`] if it has none
    pub fn read(&self, path: &str) -> Result<&str> {
        Ok(self.content(path)?.unwrap_or(EMPTY_FILE))
    }

    /// Replace the content of the file at `path` wholesale
    pub fn write_content(&mut self, path: &str, content: impl Into<String>) -> Result<()> {
        let id = self.resolve(path).ok_or_else(|| TreeError::NotFound {
            path: path.to_string(),
        })?;
        let node = self.node_mut(id);
        if node.is_container() {
            return Err(TreeError::NotALeaf {
                path: path.to_string(),
            });
        }
        let content = content.into();
        debug!("wrote {} bytes to '{}'", content.len(), path);
        node.content = Some(content);
        Ok(())
    }

    /// Count the nodes of the subtree at `from` (root when `None`), inclusive
    pub fn size(&self, from: Option<&str>) -> Result<usize> {
        let start = match from {
            Some(path) => self.resolve(path).ok_or_else(|| TreeError::NotFound {
                path: path.to_string(),
            })?,
            None => NodeId::ROOT,
        };
        Ok(self.walk_from(start, TraversalOrder::PreOrder).count())
    }

    /// Absolute path of a node by ID
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        self.path(id)
    }
}

impl Tree for Namespace {
    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.get())?.as_ref()
    }

    fn node_count(&self) -> usize {
        self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ErrorKind;
    use pretty_assertions::assert_eq;

    fn entries(list: &[(NodeKind, &str)]) -> Vec<Entry> {
        list.iter()
            .map(|&(kind, name)| Entry {
                kind,
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_new_has_root() {
        let tree = Namespace::new();
        assert_eq!(tree.resolve("/"), Some(NodeId::ROOT));
        assert_eq!(tree.resolve(""), Some(NodeId::ROOT));
        assert_eq!(tree.name(NodeId::ROOT), Some("/"));
        assert!(tree.is_container(NodeId::ROOT));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.size(None).unwrap(), 1);
    }

    #[test]
    fn test_resolve_ignores_extra_separators() {
        let mut tree = Namespace::new();
        let a = tree.insert("/", "a", NodeKind::Container, None).unwrap();
        let b = tree.insert("/a", "b", NodeKind::Leaf, None).unwrap();
        assert_eq!(tree.resolve("/a/"), Some(a));
        assert_eq!(tree.resolve("//a//b"), Some(b));
        assert_eq!(tree.resolve("a/b"), Some(b));
        assert_eq!(tree.resolve("/a/c"), None);
        assert_eq!(tree.resolve("/a/b/c"), None);
    }

    #[test]
    fn test_insert_sorts_files_before_folders() {
        let mut tree = Namespace::new();
        tree.insert("/", "b", NodeKind::Leaf, None).unwrap();
        tree.insert("/", "a", NodeKind::Container, None).unwrap();
        tree.insert("/", "c", NodeKind::Container, None).unwrap();
        tree.insert("/", "a.txt", NodeKind::Leaf, None).unwrap();

        assert_eq!(
            tree.list("/").unwrap(),
            entries(&[
                (NodeKind::Leaf, "a.txt"),
                (NodeKind::Leaf, "b"),
                (NodeKind::Container, "a"),
                (NodeKind::Container, "c"),
            ])
        );
    }

    #[test]
    fn test_insert_errors() {
        let mut tree = Namespace::new();
        tree.insert("/", "docs", NodeKind::Container, None).unwrap();
        tree.insert("/docs", "a.txt", NodeKind::Leaf, None).unwrap();

        assert_eq!(
            tree.insert("/nope", "x", NodeKind::Leaf, None),
            Err(TreeError::ParentNotFound {
                path: "/nope".into()
            })
        );
        assert_eq!(
            tree.insert("/docs/a.txt", "x", NodeKind::Leaf, None),
            Err(TreeError::ParentNotContainer {
                path: "/docs/a.txt".into()
            })
        );
        let before = tree.list("/docs").unwrap();
        let err = tree
            .insert("/docs", "a.txt", NodeKind::Container, None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NameCollision);
        assert_eq!(tree.list("/docs").unwrap(), before);

        let err = tree.insert("/docs", "a/b", NodeKind::Leaf, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_delete_subtree() {
        let mut tree = Namespace::new();
        tree.insert("/", "a", NodeKind::Container, None).unwrap();
        tree.insert("/a", "b", NodeKind::Container, None).unwrap();
        tree.insert("/a/b", "c.txt", NodeKind::Leaf, None).unwrap();
        tree.insert("/", "keep", NodeKind::Leaf, None).unwrap();
        assert_eq!(tree.size(None).unwrap(), 5);
        assert_eq!(tree.size(Some("/a")).unwrap(), 3);

        tree.delete("/a").unwrap();
        assert_eq!(tree.resolve("/a"), None);
        assert_eq!(tree.resolve("/a/b/c.txt"), None);
        assert_eq!(tree.size(None).unwrap(), 2);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_delete_errors() {
        let mut tree = Namespace::new();
        assert_eq!(tree.delete("/"), Err(TreeError::RootDeletionForbidden));
        assert_eq!(tree.delete("//"), Err(TreeError::RootDeletionForbidden));
        assert_eq!(
            tree.delete("/ghost"),
            Err(TreeError::NotFound {
                path: "/ghost".into()
            })
        );
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut tree = Namespace::new();
        let first = tree.insert("/", "a", NodeKind::Leaf, None).unwrap();
        tree.delete("/a").unwrap();
        let second = tree.insert("/", "a", NodeKind::Leaf, None).unwrap();
        assert_ne!(first, second);
        assert!(tree.get(first).is_none());
    }

    #[test]
    fn test_move_preserves_identity() {
        let mut tree = Namespace::new();
        tree.insert("/", "src", NodeKind::Container, None).unwrap();
        tree.insert("/", "dst", NodeKind::Container, None).unwrap();
        let moved = tree.insert("/src", "inner", NodeKind::Container, None).unwrap();
        tree.insert("/src/inner", "f.txt", NodeKind::Leaf, Some("hi".into()))
            .unwrap();

        tree.move_node("/src/inner", "/dst").unwrap();
        assert_eq!(tree.resolve("/dst/inner"), Some(moved));
        assert_eq!(tree.resolve("/src/inner"), None);
        assert_eq!(tree.read("/dst/inner/f.txt").unwrap(), "hi");
        assert_eq!(tree.parent(moved), tree.resolve("/dst"));
    }

    #[test]
    fn test_move_errors() {
        let mut tree = Namespace::new();
        tree.insert("/", "a", NodeKind::Container, None).unwrap();
        tree.insert("/a", "b", NodeKind::Container, None).unwrap();
        tree.insert("/", "f", NodeKind::Leaf, None).unwrap();
        tree.insert("/a/b", "f", NodeKind::Leaf, None).unwrap();

        assert_eq!(
            tree.move_node("/a", "/a/b").unwrap_err().kind(),
            ErrorKind::CyclicMove
        );
        assert_eq!(
            tree.move_node("/a", "/a").unwrap_err().kind(),
            ErrorKind::CyclicMove
        );
        assert_eq!(
            tree.move_node("/", "/a").unwrap_err().kind(),
            ErrorKind::CyclicMove
        );
        assert_eq!(
            tree.move_node("/a", "/f"),
            Err(TreeError::DestNotContainer { path: "/f".into() })
        );
        assert_eq!(
            tree.move_node("/x", "/a").unwrap_err(),
            TreeError::InvalidSourceOrDest {
                source: "/x".into(),
                dest: "/a".into()
            }
        );
        assert_eq!(
            tree.move_node("/f", "/a/b").unwrap_err().kind(),
            ErrorKind::NameCollision
        );
        assert_eq!(tree.size(None).unwrap(), 5);
    }

    #[test]
    fn test_rename() {
        let mut tree = Namespace::new();
        tree.insert("/", "docs", NodeKind::Container, None).unwrap();
        let id = tree.insert("/", "z.txt", NodeKind::Leaf, None).unwrap();
        tree.insert("/", "m.txt", NodeKind::Leaf, None).unwrap();

        tree.rename("/z.txt", "a.txt").unwrap();
        assert_eq!(tree.resolve("/a.txt"), Some(id));
        assert_eq!(
            tree.list("/").unwrap(),
            entries(&[
                (NodeKind::Leaf, "a.txt"),
                (NodeKind::Leaf, "m.txt"),
                (NodeKind::Container, "docs"),
            ])
        );

        // Renaming to its own name is a no-op
        tree.rename("/a.txt", "a.txt").unwrap();
    }

    #[test]
    fn test_rename_errors() {
        let mut tree = Namespace::new();
        tree.insert("/", "a", NodeKind::Leaf, None).unwrap();
        tree.insert("/", "b", NodeKind::Leaf, None).unwrap();
        let before = tree.list("/").unwrap();

        assert_eq!(tree.rename("/", "x"), Err(TreeError::RootRenameForbidden));
        assert_eq!(
            tree.rename("/missing", "x"),
            Err(TreeError::NotFound {
                path: "/missing".into()
            })
        );
        assert_eq!(
            tree.rename("/a", "b"),
            Err(TreeError::NameCollision {
                name: "b".into(),
                parent: "/".into()
            })
        );
        assert_eq!(tree.rename("/a", "").unwrap_err().kind(), ErrorKind::InvalidName);
        assert_eq!(tree.list("/").unwrap(), before);
    }

    #[test]
    fn test_list_file_lists_itself() {
        let mut tree = Namespace::new();
        tree.insert("/", "a.txt", NodeKind::Leaf, None).unwrap();
        assert_eq!(
            tree.list("/a.txt").unwrap(),
            entries(&[(NodeKind::Leaf, "a.txt")])
        );
        assert_eq!(tree.list("/nope").unwrap_err().kind(), ErrorKind::NotFound);
        assert!(tree.list("/").unwrap().len() == 1);
    }

    #[test]
    fn test_read_and_write() {
        let mut tree = Namespace::new();
        tree.insert("/", "docs", NodeKind::Container, Some("ignored".into()))
            .unwrap();
        tree.insert("/docs", "a.txt", NodeKind::Leaf, None).unwrap();
        tree.insert("/docs", "b.txt", NodeKind::Leaf, Some(String::new()))
            .unwrap();

        assert_eq!(tree.read("/docs/a.txt").unwrap(), EMPTY_FILE);
        assert_eq!(tree.content("/docs/a.txt").unwrap(), None);
        assert_eq!(tree.read("/docs/b.txt").unwrap(), "");
        assert_eq!(
            tree.read("/docs"),
            Err(TreeError::NotALeaf {
                path: "/docs".into()
            })
        );
        assert_eq!(tree.read("/x").unwrap_err().kind(), ErrorKind::NotFound);

        tree.write_content("/docs/a.txt", "line 1\nline 2").unwrap();
        assert_eq!(tree.read("/docs/a.txt").unwrap(), "line 1\nline 2");
        assert_eq!(
            tree.write_content("/docs", "x").unwrap_err().kind(),
            ErrorKind::NotALeaf
        );
        assert_eq!(
            tree.write_content("/x", "x").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_size_of_leaf_and_missing() {
        let mut tree = Namespace::new();
        tree.insert("/", "a.txt", NodeKind::Leaf, None).unwrap();
        assert_eq!(tree.size(Some("/a.txt")).unwrap(), 1);
        assert_eq!(tree.size(Some("/nope")).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_move_resorts_destination() {
        let mut tree = Namespace::new();
        tree.insert("/", "src", NodeKind::Container, None).unwrap();
        tree.insert("/", "dst", NodeKind::Container, None).unwrap();
        tree.insert("/dst", "z", NodeKind::Container, None).unwrap();
        tree.insert("/dst", "m.txt", NodeKind::Leaf, None).unwrap();
        tree.insert("/src", "a.txt", NodeKind::Leaf, None).unwrap();

        tree.move_node("/src/a.txt", "/dst").unwrap();
        assert_eq!(
            tree.list("/dst").unwrap(),
            entries(&[
                (NodeKind::Leaf, "a.txt"),
                (NodeKind::Leaf, "m.txt"),
                (NodeKind::Container, "z"),
            ])
        );
    }

    #[test]
    fn test_sort_children_ignores_stale_ids() {
        let mut tree = Namespace::new();
        let stale = tree.insert("/", "a", NodeKind::Container, None).unwrap();
        tree.insert("/", "b", NodeKind::Leaf, None).unwrap();
        tree.delete("/a").unwrap();

        tree.sort_children(stale);
        tree.sort_children(NodeId(404));
        assert_eq!(tree.list("/").unwrap(), entries(&[(NodeKind::Leaf, "b")]));
    }

    #[test]
    fn test_sort_children_is_idempotent() {
        let mut tree = Namespace::new();
        tree.insert("/", "b", NodeKind::Container, None).unwrap();
        tree.insert("/", "a", NodeKind::Leaf, None).unwrap();
        let before = tree.list("/").unwrap();
        tree.sort_children(NodeId::ROOT);
        assert_eq!(tree.list("/").unwrap(), before);
    }
}
