//! Site facade over the content tree and version index.
//!
//! [`DocsSite`] is built once from the corpus and answers per-page queries.
//! Construction runs every build-time step in order:
//!
//! 1. Build the [`ContentTree`]
//! 2. Attach navigation orderings
//! 3. Build the [`VersionIndex`]
//! 4. Collect and log missing-index warnings, unless disabled in
//!    [`SiteOptions`]

use vdocs_content::{ContentNode, VersionIndex};

use crate::frontmatter::{ResolvedFrontmatter, resolve_frontmatter};
use crate::navigation::{NavNode, PrevNext, find_prev_next, tree_to_navigation};
use crate::ordering::apply_navigation_order;
use crate::tree::{ContentTree, MissingIndex, TreeNode};

/// Build-time switches for [`DocsSite`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SiteOptions {
    /// Report directories that have no index page.
    pub warn_missing_index: bool,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            warn_missing_index: true,
        }
    }
}

/// Built documentation site.
#[derive(Clone, Debug)]
pub struct DocsSite {
    tree: ContentTree,
    versions: VersionIndex,
    missing_indexes: Vec<MissingIndex>,
}

impl DocsSite {
    /// Build the site from the corpus with default options.
    #[must_use]
    pub fn new(nodes: &[ContentNode]) -> Self {
        Self::with_options(nodes, SiteOptions::default())
    }

    /// Build the site from the corpus.
    #[must_use]
    pub fn with_options(nodes: &[ContentNode], options: SiteOptions) -> Self {
        let mut tree = ContentTree::build(nodes);
        apply_navigation_order(&mut tree);
        let versions = VersionIndex::build(nodes);

        let missing_indexes = if options.warn_missing_index {
            tree.missing_indexes()
        } else {
            Vec::new()
        };
        for missing in &missing_indexes {
            tracing::warn!(path = %missing.path, "Directory is missing an index page");
        }

        tracing::debug!(
            pages = nodes.len(),
            tree_nodes = tree.len(),
            products = versions.products().count(),
            "Site built"
        );

        Self {
            tree,
            versions,
            missing_indexes,
        }
    }

    #[must_use]
    pub fn tree(&self) -> &ContentTree {
        &self.tree
    }

    #[must_use]
    pub fn versions(&self) -> &VersionIndex {
        &self.versions
    }

    /// Directories found without an index page while building.
    ///
    /// Always empty when built with `warn_missing_index` off.
    #[must_use]
    pub fn missing_indexes(&self) -> &[MissingIndex] {
        &self.missing_indexes
    }

    /// Tree node for a path. The trailing slash is optional.
    #[must_use]
    pub fn page(&self, path: &str) -> Option<&TreeNode> {
        self.tree.find(path).map(|id| self.tree.node(id))
    }

    /// Effective frontmatter of a page.
    ///
    /// Returns `None` for unknown paths and structural directories.
    #[must_use]
    pub fn frontmatter(&self, path: &str) -> Option<ResolvedFrontmatter> {
        resolve_frontmatter(&self.tree, self.tree.find(path)?)
    }

    /// Navigation tree pruned to the ancestor chain of `path`.
    #[must_use]
    pub fn navigation(&self, path: &str) -> Option<NavNode> {
        Some(tree_to_navigation(&self.tree, self.tree.find(path)?))
    }

    /// Previous and next pages for `path`.
    #[must_use]
    pub fn prev_next(&self, path: &str) -> Option<PrevNext> {
        let id = self.tree.find(path)?;
        let nav_tree = tree_to_navigation(&self.tree, id);
        Some(find_prev_next(&self.tree, &nav_tree, id))
    }
}
