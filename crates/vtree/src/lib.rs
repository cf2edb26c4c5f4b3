//! Virtual Namespace Tree
//!
//! An in-memory hierarchy of folders and files addressed by `/`-separated
//! paths, with a text renderer and a small command shell on top.
//!
//! # Core Concepts
//!
//! - **Namespace**: owns the root folder and every path-based operation
//! - **Node**: a single folder (container) or file (leaf)
//! - **Tree**: read-only navigation trait used by the renderer
//!
//! # Example
//!
//! ```
//! use vtree::prelude::*;
//!
//! let mut tree = Namespace::new();
//! tree.insert("/", "Documents", NodeKind::Container, None).unwrap();
//! tree.insert("/Documents", "Report.txt", NodeKind::Leaf, Some("draft".into())).unwrap();
//!
//! tree.rename("/Documents/Report.txt", "Final.txt").unwrap();
//! assert_eq!(tree.read("/Documents/Final.txt").unwrap(), "draft");
//!
//! for id in tree.walk(TraversalOrder::PreOrder) {
//!     let depth = tree.depth(id);
//!     println!("{:indent$}{}", "", tree.name(id).unwrap(), indent = depth * 2);
//! }
//! ```

pub mod render;
pub mod shell;
pub mod tree;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::render::{render, RenderOptions};
    pub use crate::shell::{Command, Shell};
    pub use crate::tree::prelude::*;
}
