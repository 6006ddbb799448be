//! Navigation ordering of child pages.
//!
//! A page may list its children in a `navigation` frontmatter key:
//!
//! ```yaml
//! navigation:
//!   - "#Getting Started"
//!   - install
//!   - upgrade
//! ```
//!
//! Entries are child slugs (the last path segment). Entries starting with `#`
//! are section headings and do not name a child. Children not listed follow
//! the listed ones in tree order.

use crate::tree::{ContentTree, NodeId};

/// Attach a navigation ordering to every node that has children.
pub fn apply_navigation_order(tree: &mut ContentTree) {
    let ordered: Vec<(NodeId, Vec<NodeId>)> = tree
        .ids()
        .filter(|&id| !tree.node(id).children.is_empty())
        .map(|id| (id, ordered_children(tree, id)))
        .collect();

    for (id, children) in ordered {
        let nav_nodes = children.iter().map(|&child| tree.nav_node(child)).collect();
        tree.set_navigation_nodes(id, Some(nav_nodes));
    }
}

/// Children of `id`, listed ones first.
fn ordered_children(tree: &ContentTree, id: NodeId) -> Vec<NodeId> {
    let node = tree.node(id);
    let mut remaining = node.children.clone();

    let listed = node
        .content
        .as_ref()
        .and_then(|c| c.frontmatter.navigation.as_deref())
        .unwrap_or_default();

    let mut ordered = Vec::with_capacity(remaining.len());
    for entry in listed.iter().map(|e| e.trim()) {
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        if let Some(pos) = remaining
            .iter()
            .position(|&child| slug(&tree.node(child).path) == entry.trim_matches('/'))
        {
            ordered.push(remaining.remove(pos));
        } else {
            tracing::debug!(path = %node.path, entry, "Navigation entry matches no child");
        }
    }

    ordered.extend(remaining);
    ordered
}

/// Last non-empty segment of a path.
fn slug(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}
