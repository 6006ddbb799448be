//! Content tree built from URL paths.
//!
//! # Architecture
//!
//! Tree nodes are stored in a flat `Vec<TreeNode>` with parent/children
//! relationships tracked by [`NodeId`] indices. The tree is never restructured
//! after [`ContentTree::build`]; the only later mutation is attaching
//! navigation orderings with [`ContentTree::set_navigation_nodes`].
//!
//! Every distinct path prefix of every content path gets exactly one node.
//! Nodes whose path matches a content item carry it as `content`; the rest are
//! purely structural directory nodes.

use std::collections::HashMap;
use std::fmt;

use vdocs_content::path::{ensure_trailing_slash, path_to_depth};
use vdocs_content::{ContentNode, PageFields};

use crate::navigation::NavNode;

/// Index of a node in a [`ContentTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One path segment in the content hierarchy.
#[derive(Clone, Debug)]
pub struct TreeNode {
    /// Path with trailing slash (e.g. `"/epas/15/"`).
    pub path: String,
    /// Number of non-empty path segments. The root has depth 0.
    pub depth: usize,
    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,
    /// Child nodes in corpus insertion order.
    pub children: Vec<NodeId>,
    /// Content item whose path equals this node's path.
    pub content: Option<ContentNode>,
    /// Externally supplied ordering of this node's children for navigation.
    pub navigation_nodes: Option<Vec<NavNode>>,
}

impl TreeNode {
    fn new(path: String, parent: Option<NodeId>) -> Self {
        Self {
            depth: path_to_depth(&path),
            path,
            parent,
            children: Vec::new(),
            content: None,
            navigation_nodes: None,
        }
    }
}

/// Structural warning: a directory without an index page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingIndex {
    /// Directory path.
    pub path: String,
}

impl fmt::Display for MissingIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is missing an index page", self.path)
    }
}

/// Hierarchical view of the content corpus.
#[derive(Clone, Debug)]
pub struct ContentTree {
    nodes: Vec<TreeNode>,
    path_index: HashMap<String, NodeId>,
}

const ROOT: NodeId = NodeId(0);

impl ContentTree {
    /// Build the tree from the corpus, in corpus order.
    ///
    /// Content paths are normalized to end with a slash. When two items share
    /// a path the last one wins; the content source is expected to prevent
    /// that.
    #[must_use]
    pub fn build(contents: &[ContentNode]) -> Self {
        let mut tree = Self {
            nodes: vec![TreeNode::new("/".to_owned(), None)],
            path_index: HashMap::from([("/".to_owned(), ROOT)]),
        };

        for content in contents {
            tree.insert(content.clone());
        }

        tracing::debug!(node_count = tree.nodes.len(), "Content tree built");
        tree
    }

    fn insert(&mut self, mut content: ContentNode) {
        let path = ensure_trailing_slash(&content.path);
        let segments: Vec<&str> = path.split('/').collect();

        // "/a/b/" splits into ["", "a", "b", ""]: one prefix per inner segment
        let mut current = ROOT;
        for end in 2..segments.len() {
            let prefix = format!("/{}/", segments[1..end].join("/"));
            current = self.find_or_insert_child(current, prefix);
        }

        content.path = path;
        self.nodes[current.0].content = Some(content);
    }

    /// Find a child by exact path among `parent`'s children, or append it.
    fn find_or_insert_child(&mut self, parent: NodeId, path: String) -> NodeId {
        if let Some(existing) = self.child_by_path(parent, &path) {
            return existing;
        }

        let id = NodeId(self.nodes.len());
        self.path_index.insert(path.clone(), id);
        self.nodes.push(TreeNode::new(path, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Root node (`"/"`).
    #[must_use]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Get a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Find a node by path. The trailing slash is optional.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<NodeId> {
        self.path_index.get(&ensure_trailing_slash(path)).copied()
    }

    /// Find the child of `parent` with exactly `path`.
    #[must_use]
    pub fn child_by_path(&self, parent: NodeId, path: &str) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).path == path)
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Ancestors of `id`, nearest first, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&current| self.parent(current))
    }

    /// All node ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach the navigation ordering for `id`'s children.
    pub fn set_navigation_nodes(&mut self, id: NodeId, nav_nodes: Option<Vec<NavNode>>) {
        self.nodes[id.0].navigation_nodes = nav_nodes;
    }

    /// Project a tree node into a [`NavNode`] without `items`.
    ///
    /// Display fields come from the node's own frontmatter, not the inherited
    /// one. Structural nodes produce a node with only `path` and `child_count`.
    #[must_use]
    pub fn nav_node(&self, id: NodeId) -> NavNode {
        let node = self.node(id);
        let fields = node.content.as_ref().map(|c| &c.frontmatter.fields);

        NavNode {
            path: node.path.clone(),
            nav_title: fields.and_then(|f| f.nav_title()).map(str::to_owned),
            title: fields.and_then(|f| f.title()).map(str::to_owned),
            hide_version: fields.and_then(|f| f.hide_version()),
            display_banner: fields.and_then(|f| f.display_banner()).map(str::to_owned),
            depth: node.content.as_ref().map(|c| path_to_depth(&c.path)),
            icon_name: fields.and_then(|f| f.icon_name()).map(str::to_owned),
            description: fields.and_then(|f| f.description()).map(str::to_owned),
            interactive: fields.is_some_and(|f| f.interactive()),
            child_count: node.children.len(),
            items: None,
        }
    }

    /// Directories at depth 2 or more that have content below them but no
    /// index page of their own.
    ///
    /// Content below is detected by following first children.
    #[must_use]
    pub fn missing_indexes(&self) -> Vec<MissingIndex> {
        self.nodes
            .iter()
            .filter(|node| node.content.is_none() && node.depth >= 2)
            .filter(|node| self.first_child_chain_has_content(node))
            .map(|node| MissingIndex {
                path: node.path.clone(),
            })
            .collect()
    }

    fn first_child_chain_has_content(&self, node: &TreeNode) -> bool {
        let mut current = node;
        loop {
            if current.content.is_some() {
                return true;
            }
            match current.children.first() {
                Some(&child) => current = self.node(child),
                None => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vdocs_content::Frontmatter;

    use super::*;

    fn corpus(paths: &[&str]) -> Vec<ContentNode> {
        paths.iter().map(|p| ContentNode::new(p)).collect()
    }

    #[test]
    fn test_build_empty_corpus_has_root_only() {
        let tree = ContentTree::build(&[]);

        assert_eq!(tree.len(), 1);
        let root = tree.node(tree.root());
        assert_eq!(root.path, "/");
        assert_eq!(root.depth, 0);
        assert!(root.parent.is_none());
        assert!(root.content.is_none());
    }

    #[test]
    fn test_build_root_content_attaches_to_root() {
        let tree = ContentTree::build(&corpus(&["/"]));

        assert_eq!(tree.len(), 1);
        let root = tree.node(tree.root());
        assert_eq!(root.content.as_ref().map(|c| c.path.as_str()), Some("/"));
    }

    #[test]
    fn test_build_one_node_per_prefix() {
        let tree = ContentTree::build(&corpus(&[
            "/epas/15/install/linux/",
            "/epas/15/install/windows/",
            "/epas/14/",
        ]));

        let paths: HashSet<_> = tree.ids().map(|id| tree.node(id).path.clone()).collect();
        let expected: HashSet<_> = [
            "/",
            "/epas/",
            "/epas/15/",
            "/epas/15/install/",
            "/epas/15/install/linux/",
            "/epas/15/install/windows/",
            "/epas/14/",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect();
        assert_eq!(paths, expected);
        assert_eq!(tree.len(), expected.len());
    }

    #[test]
    fn test_build_content_path_matches_node_path() {
        let tree = ContentTree::build(&corpus(&["/a/b", "/a/", "/c/d/e/"]));

        for id in tree.ids() {
            let node = tree.node(id);
            if let Some(content) = &node.content {
                assert_eq!(content.path, node.path);
            }
        }
        assert!(tree.node(tree.find("/a/b/").unwrap()).content.is_some());
        assert!(tree.node(tree.find("/c/d/").unwrap()).content.is_none());
    }

    #[test]
    fn test_build_children_in_corpus_order() {
        let tree = ContentTree::build(&corpus(&["/b/", "/a/", "/b/x/", "/c/"]));

        let root_children: Vec<_> = tree
            .node(tree.root())
            .children
            .iter()
            .map(|&c| tree.node(c).path.as_str())
            .collect();
        assert_eq!(root_children, vec!["/b/", "/a/", "/c/"]);
    }

    #[test]
    fn test_depth_and_parent_links() {
        let tree = ContentTree::build(&corpus(&["/epas/15/install/"]));
        let install = tree.find("/epas/15/install").unwrap();

        assert_eq!(tree.node(install).depth, 3);
        let ancestors: Vec<_> = tree
            .ancestors(install)
            .map(|id| tree.node(id).path.as_str())
            .collect();
        assert_eq!(ancestors, vec!["/epas/15/", "/epas/", "/"]);
    }

    #[test]
    fn test_find_missing_returns_none() {
        let tree = ContentTree::build(&corpus(&["/a/"]));
        assert!(tree.find("/b/").is_none());
    }

    #[test]
    fn test_child_by_path() {
        let tree = ContentTree::build(&corpus(&["/a/b/"]));
        let a = tree.find("/a/").unwrap();

        assert_eq!(tree.child_by_path(a, "/a/b/"), tree.find("/a/b/"));
        assert_eq!(tree.child_by_path(tree.root(), "/a/b/"), None);
    }

    #[test]
    fn test_nav_node_projection() {
        let frontmatter = Frontmatter::from_yaml(
            "title: Install\nnavTitle: Installing\niconName: Download\nhideVersion: true\nkatacodaPanel:\n  scenario: x",
        )
        .unwrap();
        let nodes = vec![
            ContentNode::new("/epas/15/install/").with_frontmatter(frontmatter),
            ContentNode::new("/epas/15/install/linux/"),
        ];
        let tree = ContentTree::build(&nodes);

        let nav = tree.nav_node(tree.find("/epas/15/install/").unwrap());

        assert_eq!(nav.path, "/epas/15/install/");
        assert_eq!(nav.title.as_deref(), Some("Install"));
        assert_eq!(nav.nav_title.as_deref(), Some("Installing"));
        assert_eq!(nav.icon_name.as_deref(), Some("Download"));
        assert_eq!(nav.hide_version, Some(true));
        assert_eq!(nav.depth, Some(3));
        assert!(nav.interactive);
        assert_eq!(nav.child_count, 1);
        assert!(nav.items.is_none());
    }

    #[test]
    fn test_nav_node_structural_directory() {
        let tree = ContentTree::build(&corpus(&["/epas/15/"]));

        let nav = tree.nav_node(tree.find("/epas/").unwrap());

        assert_eq!(nav.path, "/epas/");
        assert!(nav.title.is_none());
        assert!(nav.depth.is_none());
        assert!(!nav.interactive);
        assert_eq!(nav.child_count, 1);
    }

    #[test]
    fn test_set_navigation_nodes() {
        let mut tree = ContentTree::build(&corpus(&["/a/"]));
        let root = tree.root();
        let nav = tree.nav_node(tree.find("/a/").unwrap());

        tree.set_navigation_nodes(root, Some(vec![nav.clone()]));

        assert_eq!(tree.node(root).navigation_nodes, Some(vec![nav]));
    }

    #[test]
    fn test_missing_indexes_reports_deep_directories_only() {
        let mut nodes = corpus(&["/epas/15/install/linux/", "/guides/intro/"]);
        nodes[0].frontmatter.fields.insert("title".to_owned(), json!("Linux"));
        let tree = ContentTree::build(&nodes);

        let missing: Vec<_> = tree.missing_indexes().into_iter().map(|m| m.path).collect();

        // "/epas/" and "/guides/" are shallower than depth 2
        assert_eq!(missing, vec!["/epas/15/", "/epas/15/install/"]);
    }

    #[test]
    fn test_missing_index_display() {
        let warning = MissingIndex {
            path: "/epas/15/".to_owned(),
        };
        assert_eq!(warning.to_string(), "/epas/15/ is missing an index page");
    }
}
