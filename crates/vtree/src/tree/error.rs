//! Failure conditions reported by namespace operations

use derive_more::Display;

/// Coarse classification of a [`TreeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// A path did not resolve
    #[display(fmt = "not found")]
    NotFound,
    /// A container was required
    #[display(fmt = "not a container")]
    NotAContainer,
    /// A leaf was required
    #[display(fmt = "not a leaf")]
    NotALeaf,
    /// A sibling already bears the name
    #[display(fmt = "name collision")]
    NameCollision,
    /// The move destination lies inside the source
    #[display(fmt = "cyclic move")]
    CyclicMove,
    /// The root cannot be deleted or renamed
    #[display(fmt = "root protected")]
    RootProtected,
    /// The name cannot be stored
    #[display(fmt = "invalid name")]
    InvalidName,
}

/// An expected, recoverable failure of a namespace operation
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TreeError {
    #[display(fmt = "path '{}' does not exist", path)]
    NotFound { path: String },

    #[display(fmt = "parent path '{}' does not exist", path)]
    ParentNotFound { path: String },

    #[display(fmt = "'{}' is not a folder, cannot add children to it", path)]
    ParentNotContainer { path: String },

    #[display(fmt = "an entry named '{}' already exists in '{}'", name, parent)]
    NameCollision { name: String, parent: String },

    #[display(fmt = "the root cannot be deleted")]
    RootDeletionForbidden,

    #[display(fmt = "the root cannot be renamed")]
    RootRenameForbidden,

    #[display(fmt = "source '{}' or destination '{}' is not valid", source, dest)]
    InvalidSourceOrDest { source: String, dest: String },

    #[display(fmt = "destination '{}' must be a folder", path)]
    DestNotContainer { path: String },

    #[display(fmt = "cannot move '{}' into itself or its descendant '{}'", source, dest)]
    CyclicMove { source: String, dest: String },

    #[display(fmt = "'{}' is a folder, not a file", path)]
    NotALeaf { path: String },

    #[display(fmt = "invalid name '{}'", name)]
    InvalidName { name: String },
}

impl TreeError {
    /// Map the specific condition onto its error class
    pub fn kind(&self) -> ErrorKind {
        match self {
            TreeError::NotFound { .. }
            | TreeError::ParentNotFound { .. }
            | TreeError::InvalidSourceOrDest { .. } => ErrorKind::NotFound,
            TreeError::ParentNotContainer { .. } | TreeError::DestNotContainer { .. } => {
                ErrorKind::NotAContainer
            }
            TreeError::NotALeaf { .. } => ErrorKind::NotALeaf,
            TreeError::NameCollision { .. } => ErrorKind::NameCollision,
            TreeError::CyclicMove { .. } => ErrorKind::CyclicMove,
            TreeError::RootDeletionForbidden | TreeError::RootRenameForbidden => {
                ErrorKind::RootProtected
            }
            TreeError::InvalidName { .. } => ErrorKind::InvalidName,
        }
    }
}

impl std::error::Error for TreeError {}

/// Result alias for namespace operations
pub type Result<T> = std::result::Result<T, TreeError>;
