//! Indented text rendering of a tree
//!
//! Read-only: everything here goes through the [`Tree`] trait.

use crate::tree::{NodeId, Tree};
use std::fmt::Write;

/// Options controlling [`render`] output.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Number of content characters shown after a file name.
    pub content_preview: usize,

    /// Whether file content previews are shown at all.
    pub show_content: bool,

    /// Draw connectors with plain ASCII instead of box-drawing characters.
    pub ascii: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            content_preview: 30,
            show_content: true,
            ascii: false,
        }
    }
}

impl RenderOptions {
    /// Create new render options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preview length.
    pub fn content_preview(mut self, chars: usize) -> Self {
        self.content_preview = chars;
        self
    }

    /// Enable or disable content previews.
    pub fn show_content(mut self, show: bool) -> Self {
        self.show_content = show;
        self
    }

    /// Use ASCII connectors.
    pub fn ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    fn connectors(&self) -> Connectors {
        if self.ascii {
            Connectors {
                branch: "|-- ",
                last: "`-- ",
                pipe: "|   ",
            }
        } else {
            Connectors {
                branch: "├── ",
                last: "└── ",
                pipe: "│   ",
            }
        }
    }
}

struct Connectors {
    branch: &'static str,
    last: &'static str,
    pipe: &'static str,
}

/// Render the whole tree, one line per node
pub fn render<T: Tree>(tree: &T, options: &RenderOptions) -> String {
    render_from(tree, tree.root(), options)
}

/// Render the subtree rooted at `start`
pub fn render_from<T: Tree>(tree: &T, start: NodeId, options: &RenderOptions) -> String {
    let mut out = String::new();
    if tree.get(start).is_some() {
        out.push_str(&describe(tree, start, options));
        out.push('\n');
        render_children(tree, start, "", options, &mut out);
    }
    out
}

fn render_children<T: Tree>(
    tree: &T,
    id: NodeId,
    prefix: &str,
    options: &RenderOptions,
    out: &mut String,
) {
    let glyphs = options.connectors();
    let children: Vec<_> = tree.children(id).collect();
    let count = children.len();

    for (index, child) in children.into_iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { glyphs.last } else { glyphs.branch };
        let _ = writeln!(out, "{}{}{}", prefix, connector, describe(tree, child, options));

        let extension = if is_last { "    " } else { glyphs.pipe };
        render_children(tree, child, &format!("{}{}", prefix, extension), options, out);
    }
}

fn describe<T: Tree>(tree: &T, id: NodeId, options: &RenderOptions) -> String {
    let Some(node) = tree.get(id) else {
        return String::new();
    };
    let mut line = format!("[{}] {}", node.kind(), node.name());
    if node.is_leaf() && options.show_content {
        match node.content().filter(|c| !c.is_empty()) {
            Some(content) => {
                let _ = write!(line, " (content: '{}')", preview(content, options.content_preview));
            }
            None => line.push_str(" (empty)"),
        }
    }
    line
}

/// First `limit` characters on one line, with `...` if anything was cut
fn preview(content: &str, limit: usize) -> String {
    let mut text: String = content
        .chars()
        .take(limit)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if content.chars().count() > limit {
        text.push_str("...");
    }
    text
}
