//! Content loading from a source directory.
//!
//! [`FsContentSource`] walks a documentation checkout laid out as
//!
//! ```text
//! <source>/product_docs/docs/<product>/<version>/**/*.mdx   -> DocType::Doc
//! <source>/advocacy_docs/**/*.mdx                           -> DocType::Advocacy
//! <source>/**/*.mdx                                         -> no doc type
//! ```
//!
//! and turns every markdown file into a [`ContentNode`]. Directory entries
//! are visited in name order, with a directory's index page first, so the
//! resulting corpus order is deterministic.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::frontmatter::{Frontmatter, FrontmatterError, split_frontmatter};
use crate::path::{doc_type_from_file_path, is_index_page};
use crate::{ContentNode, DocType};

/// Content root for versioned product documentation.
const PRODUCT_DOCS_ROOT: [&str; 2] = ["product_docs", "docs"];

/// Content root for advocacy content.
const ADVOCACY_DOCS_ROOT: [&str; 1] = ["advocacy_docs"];

/// Source of the content corpus.
pub trait ContentSource {
    /// Load every content node, in a deterministic order.
    fn load(&self) -> Result<Vec<ContentNode>, LoadError>;
}

/// Error returned when loading content fails.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error reading a file or directory.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File or directory being read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed frontmatter.
    #[error("Invalid frontmatter in {}: {source}", path.display())]
    Frontmatter {
        /// Content file.
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
    /// Two files map to the same URL path.
    #[error("{} and {} both map to {url_path}", first.display(), second.display())]
    DuplicatePath {
        /// Shared URL path.
        url_path: String,
        /// File seen first.
        first: PathBuf,
        /// File seen second.
        second: PathBuf,
    },
}

/// Filesystem content source.
pub struct FsContentSource {
    source_dir: PathBuf,
}

impl FsContentSource {
    /// Create a content source rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Collect content files under `dir`, index page first.
    fn scan_directory(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), LoadError> {
        let io_err = |source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Skip hidden files/dirs
            if name.starts_with('.') {
                continue;
            }
            let is_dir = entry.file_type().map_err(io_err)?.is_dir();
            entries.push((name, entry.path(), is_dir));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        if let Some(pos) = entries
            .iter()
            .position(|(name, _, is_dir)| !is_dir && is_index_page(name))
        {
            let (_, index_path, _) = entries.remove(pos);
            files.push(index_path);
        }

        for (_, path, is_dir) in entries {
            if is_dir {
                self.scan_directory(&path, files)?;
            } else if is_content_file(&path) {
                files.push(path);
            }
        }

        Ok(())
    }

    /// Build a content node from a file.
    fn build_node(&self, file: &Path) -> Result<ContentNode, LoadError> {
        let rel = file.strip_prefix(&self.source_dir).unwrap_or(file);
        let segments: Vec<String> = rel
            .iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();

        let (doc_type, segments) = classify(&segments, file);
        let path = file_segments_to_url(segments);

        let (doc_type, product, version) = match (doc_type, segments) {
            (Some(DocType::Doc), [product, version, _, ..]) => (
                Some(DocType::Doc),
                Some(product.clone()),
                Some(version.clone()),
            ),
            // Product docs outside a version directory are not versioned content
            (Some(DocType::Doc), _) => (None, None, None),
            (doc_type, _) => (doc_type, None, None),
        };

        let source = fs::read_to_string(file).map_err(|source| LoadError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let (yaml, _body) = split_frontmatter(&source);
        let frontmatter = match yaml {
            Some(yaml) => {
                Frontmatter::from_yaml(yaml).map_err(|source| LoadError::Frontmatter {
                    path: file.to_path_buf(),
                    source,
                })?
            }
            None => Frontmatter::default(),
        };

        Ok(ContentNode {
            path,
            doc_type,
            product,
            version,
            frontmatter,
            file_absolute_path: Some(file.to_path_buf()),
        })
    }
}

impl ContentSource for FsContentSource {
    fn load(&self) -> Result<Vec<ContentNode>, LoadError> {
        if !self.source_dir.is_dir() {
            return Err(LoadError::NotFound(self.source_dir.clone()));
        }

        let mut files = Vec::new();
        self.scan_directory(&self.source_dir, &mut files)?;

        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let mut nodes = Vec::with_capacity(files.len());
        for file in files {
            let node = self.build_node(&file)?;
            if let Some(first) = seen.insert(node.path.clone(), file.clone()) {
                return Err(LoadError::DuplicatePath {
                    url_path: node.path,
                    first,
                    second: file,
                });
            }
            nodes.push(node);
        }

        tracing::debug!(
            source_dir = %self.source_dir.display(),
            node_count = nodes.len(),
            "Content scan completed"
        );
        Ok(nodes)
    }
}

/// Determine the doc type and strip the content root from relative segments.
fn classify<'a>(segments: &'a [String], file: &Path) -> (Option<DocType>, &'a [String]) {
    if starts_with(segments, &PRODUCT_DOCS_ROOT) {
        return (Some(DocType::Doc), &segments[PRODUCT_DOCS_ROOT.len()..]);
    }
    if starts_with(segments, &ADVOCACY_DOCS_ROOT) {
        return (Some(DocType::Advocacy), &segments[ADVOCACY_DOCS_ROOT.len()..]);
    }
    (doc_type_from_file_path(file), segments)
}

fn starts_with(segments: &[String], prefix: &[&str]) -> bool {
    segments.len() > prefix.len() && segments.iter().zip(prefix).all(|(s, p)| s == p)
}

/// Convert relative file segments to a URL path.
///
/// Examples:
/// - `index.mdx` -> `/`
/// - `guide.mdx` -> `/guide/`
/// - `epas/15/index.mdx` -> `/epas/15/`
/// - `epas/15/install.md` -> `/epas/15/install/`
fn file_segments_to_url(segments: &[String]) -> String {
    let mut parts: Vec<&str> = segments.iter().map(String::as_str).collect();
    if let Some(last) = parts.pop()
        && !is_index_page(last)
    {
        let stem = last
            .strip_suffix(".mdx")
            .or_else(|| last.strip_suffix(".md"))
            .unwrap_or(last);
        parts.push(stem);
    }

    if parts.is_empty() {
        "/".to_owned()
    } else {
        format!("/{}/", parts.join("/"))
    }
}

fn is_content_file(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "md" || e == "mdx")
}
