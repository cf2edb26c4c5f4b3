//! Path parsing helpers
//!
//! Paths are purely syntactic: `/` separates segments, empty segments are
//! dropped, and there is no `.`/`..` handling.

use crate::tree::error::{Result, TreeError};

/// Path separator
pub const SEPARATOR: char = '/';

/// Split a path into its non-empty segments
///
/// # Examples
///
/// ```
/// use vtree::tree::path;
///
/// assert_eq!(path::segments("/docs//notes/"), vec!["docs", "notes"]);
/// assert!(path::segments("/").is_empty());
/// ```
pub fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// True if the path names the root (`""`, `/`, `//`, ...)
pub fn is_root(path: &str) -> bool {
    path.split(SEPARATOR).all(str::is_empty)
}

/// Append a name to a parent path
pub fn join(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches(SEPARATOR);
    format!("{}{}{}", parent, SEPARATOR, name)
}

/// Reject names that could never be resolved again
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(SEPARATOR) {
        return Err(TreeError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}
