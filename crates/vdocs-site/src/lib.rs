//! Site structure for vdocs.
//!
//! This crate provides:
//! - [`ContentTree`]: arena tree with one node per URL path prefix
//! - Frontmatter resolution with `directoryDefaults` inheritance
//! - Navigation menus pruned to the current page, and prev/next links
//! - [`DocsSite`]: facade that builds all of the above from a corpus
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use vdocs_content::{ContentSource, FsContentSource};
//! use vdocs_site::DocsSite;
//!
//! let nodes = FsContentSource::new(PathBuf::from("content")).load()?;
//! let site = DocsSite::new(&nodes);
//!
//! let nav = site.navigation("/epas/15/installing/");
//! let links = site.prev_next("/epas/15/installing/");
//! # Ok(())
//! # }
//! ```

mod frontmatter;
mod navigation;
mod ordering;
mod site;
mod tree;

pub use frontmatter::{ResolvedFrontmatter, frontmatter_layers, merge_layers, resolve_frontmatter};
pub use navigation::{NavNode, PrevNext, find_prev_next, flatten_nav_items, tree_to_navigation};
pub use ordering::apply_navigation_order;
pub use site::{DocsSite, SiteOptions};
pub use tree::{ContentTree, MissingIndex, NodeId, TreeNode};
