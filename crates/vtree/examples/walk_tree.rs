//! Builds a small namespace and prints its hierarchy with summary counts
//!
//! Usage:
//!   cargo run --example walk_tree

use vtree::prelude::*;

fn main() -> anyhow::Result<()> {
    let mut tree = Namespace::new();
    tree.insert("/", "home", NodeKind::Container, None)?;
    tree.insert("/home", "notes.txt", NodeKind::Leaf, Some("buy milk".into()))?;
    tree.insert("/home", "music", NodeKind::Container, None)?;
    tree.insert("/home/music", "song.mp3", NodeKind::Leaf, None)?;
    tree.insert("/", "etc", NodeKind::Container, None)?;
    tree.insert("/etc", "hosts", NodeKind::Leaf, Some("127.0.0.1 localhost".into()))?;

    println!("Namespace Structure:");
    println!("═══════════════════════════════");

    for id in tree.walk(TraversalOrder::PreOrder) {
        let Some(node) = tree.get(id) else { continue };
        let indent = "  ".repeat(tree.depth(id));

        let icon = match node.kind() {
            NodeKind::Container => "📁",
            NodeKind::Leaf => "📄",
        };

        match node.kind() {
            NodeKind::Leaf => {
                let chars = node.content().map(|c| c.chars().count()).unwrap_or(0);
                println!("{}{} {} ({} chars)", indent, icon, node.name(), chars);
            }
            NodeKind::Container => {
                println!("{}{} {} ({} items)", indent, icon, node.name(), tree.child_count(id));
            }
        }
    }

    println!("═══════════════════════════════");
    println!("Summary:");
    println!("  Total items: {}", tree.node_count());
    println!("  Folders: {}", tree.containers().len());
    println!("  Files: {}", tree.leaves().len());
    println!();
    print!("{}", render(&tree, &RenderOptions::new().ascii(true)));
    Ok(())
}
