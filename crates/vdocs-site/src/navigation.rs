//! Navigation menus and prev/next links.
//!
//! Both operations work on the `navigation_nodes` orderings attached to tree
//! nodes. Where a level has no ordering, descent stops there instead of
//! failing.

use serde::{Deserialize, Serialize};

use crate::tree::{ContentTree, NodeId};

/// Render-facing projection of a tree node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavNode {
    /// Link target path.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_version: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_banner: Option<String>,
    /// Depth of the page's content path. Absent for structural directories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the page shows an interactive badge.
    #[serde(default)]
    pub interactive: bool,
    /// Number of children of the tree node.
    #[serde(default)]
    pub child_count: usize,
    /// Nested navigation items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NavNode>>,
}

impl NavNode {
    /// Copy of this node with an empty `items` list.
    #[must_use]
    pub fn with_empty_items(&self) -> Self {
        Self {
            items: Some(Vec::new()),
            ..self.clone()
        }
    }

    /// Copy of this node with `items` removed.
    #[must_use]
    pub fn without_items(&self) -> Self {
        Self {
            items: None,
            ..self.clone()
        }
    }
}

/// Previous and next pages relative to the current page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PrevNext {
    pub prev: Option<NavNode>,
    pub next: Option<NavNode>,
}

/// Build the navigation tree pruned to the ancestor chain of `page`.
///
/// Starting from the root, each level lists every entry of the current tree
/// node's `navigation_nodes`; the last entry whose path is a prefix of the
/// page's path is expanded into the next level. Descent stops below the
/// page's depth, when nothing matches, or when a level has no ordering.
#[must_use]
pub fn tree_to_navigation(tree: &ContentTree, page: NodeId) -> NavNode {
    let page_node = tree.node(page);
    let mut root = tree.nav_node(tree.root()).with_empty_items();

    let mut items = root.items.get_or_insert_with(Vec::new);
    let mut current = Some(tree.root());

    while let Some(id) = current {
        let node = tree.node(id);
        if node.depth > page_node.depth {
            break;
        }
        let Some(nav_nodes) = &node.navigation_nodes else {
            break;
        };

        let start = items.len();
        items.extend(nav_nodes.iter().map(NavNode::with_empty_items));

        let Some(selected) = items[start..]
            .iter()
            .rposition(|nav| page_node.path.starts_with(&nav.path))
            .map(|offset| start + offset)
        else {
            break;
        };

        current = tree.child_by_path(id, &items[selected].path);
        let level = items;
        items = level[selected].items.get_or_insert_with(Vec::new);
    }

    root
}

/// Find the previous and next pages for `current`.
///
/// `nav_tree` is the tree returned by [`tree_to_navigation`] for the same
/// page.
///
/// - Prev is the preceding sibling, descended to its last leaf. For a first
///   child it is the parent itself.
/// - Next is the entry after `current` in a pre-order walk of `nav_tree`.
///
/// Entries without a path are returned as `None`.
#[must_use]
pub fn find_prev_next(tree: &ContentTree, nav_tree: &NavNode, current: NodeId) -> PrevNext {
    let node = tree.node(current);
    let Some(parent) = node.parent else {
        return PrevNext::default();
    };
    let Some(siblings) = &tree.node(parent).navigation_nodes else {
        return PrevNext::default();
    };

    let prev = match siblings.iter().position(|nav| nav.path == node.path) {
        Some(index) if index > 0 => Some(last_descendant(tree, parent, &siblings[index - 1])),
        _ => nav_node_in_parent(tree, parent),
    };

    let flat = flatten_nav_items(nav_tree.items.as_deref().unwrap_or_default());
    let next = flat
        .iter()
        .position(|nav| nav.path == node.path)
        .and_then(|index| flat.get(index + 1))
        .cloned();

    PrevNext {
        prev: prev.filter(has_path),
        next: next.filter(has_path),
    }
}

/// Follow the last entry of each ordering below `start` down to a leaf.
fn last_descendant(tree: &ContentTree, mut parent: NodeId, start: &NavNode) -> NavNode {
    let mut nav = start;
    while let Some(id) = tree.child_by_path(parent, &nav.path) {
        let Some(last) = tree
            .node(id)
            .navigation_nodes
            .as_ref()
            .and_then(|nodes| nodes.last())
        else {
            break;
        };
        nav = last;
        parent = id;
    }
    nav.clone()
}

/// The entry for `id` in its own parent's ordering.
fn nav_node_in_parent(tree: &ContentTree, id: NodeId) -> Option<NavNode> {
    let path = &tree.node(id).path;
    tree.node(tree.parent(id)?)
        .navigation_nodes
        .as_ref()?
        .iter()
        .find(|nav| &nav.path == path)
        .cloned()
}

/// Flatten navigation items pre-order, dropping nested `items`.
#[must_use]
pub fn flatten_nav_items(items: &[NavNode]) -> Vec<NavNode> {
    fn walk(items: &[NavNode], out: &mut Vec<NavNode>) {
        for item in items {
            out.push(item.without_items());
            walk(item.items.as_deref().unwrap_or_default(), out);
        }
    }

    let mut flat = Vec::new();
    walk(items, &mut flat);
    flat
}

fn has_path(nav: &NavNode) -> bool {
    !nav.path.is_empty()
}
