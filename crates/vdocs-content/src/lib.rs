//! Content model for vdocs.
//!
//! This crate provides:
//! - [`ContentNode`]: one item of the documentation corpus
//! - [`Frontmatter`]: typed page metadata with inheritable layers
//! - [`VersionIndex`]: ordered versions per product
//! - [`path`]: URL path conventions (`/<product>/<version>/<rest>/`, `latest` aliases)
//! - [`FsContentSource`]: loads a corpus from a documentation checkout
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use vdocs_content::{ContentSource, FsContentSource, VersionIndex};
//!
//! let source = FsContentSource::new(PathBuf::from("content"));
//! let nodes = source.load()?;
//! let versions = VersionIndex::build(&nodes);
//! println!("{:?}", versions.latest("epas"));
//! # Ok(())
//! # }
//! ```

pub mod frontmatter;
mod loader;
mod node;
pub mod path;
mod version;

pub use frontmatter::{Frontmatter, FrontmatterError, MetadataLayer, PageFields};
pub use loader::{ContentSource, FsContentSource, LoadError};
pub use node::{ContentNode, DocType, canonical_nodes};
pub use version::{VersionError, VersionIndex, compare_versions, sort_versions_desc};
