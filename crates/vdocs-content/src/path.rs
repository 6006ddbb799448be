//! URL path conventions for versioned documentation.
//!
//! All paths are `/`-delimited, case-sensitive and start with `/`.
//! Versioned paths follow `/<product>/<version>/<rest...>`, directory-like
//! paths end with `/`, and the version token [`LATEST`] is reserved for the
//! alias of a product's newest version.
//!
//! Segment indices follow `str::split('/')` on an absolute path, so index 1 is
//! the product and index 2 the version.

use std::borrow::Cow;
use std::path::Path;

use crate::DocType;

/// Reserved version token for the newest version of a product.
pub const LATEST: &str = "latest";

/// Index of the product segment in a split absolute path.
pub const PRODUCT_SEGMENT: usize = 1;

/// Index of the version segment in a split absolute path.
pub const VERSION_SEGMENT: usize = 2;

/// Get the `index`-th `/`-separated segment of a path.
///
/// `segment("/epas/15/install/", 2)` is `Some("15")`.
#[must_use]
pub fn segment(path: &str, index: usize) -> Option<&str> {
    path.split('/').nth(index)
}

/// Replace the version segment of a versioned path.
///
/// Everything after the version segment is preserved; a path with nothing
/// after the version gets a trailing slash.
///
/// ```
/// use vdocs_content::path::replace_path_version;
///
/// assert_eq!(replace_path_version("/pem/9/alerts/", "latest"), "/pem/latest/alerts/");
/// assert_eq!(replace_path_version("/pem/9", "latest"), "/pem/latest/");
/// ```
#[must_use]
pub fn replace_path_version(path: &str, version: &str) -> String {
    let parts: Vec<&str> = path.split('/').collect();
    let product = parts.get(PRODUCT_SEGMENT).copied().unwrap_or_default();
    let rest = parts.get(VERSION_SEGMENT + 1..).unwrap_or_default().join("/");
    if rest.is_empty() {
        format!("/{product}/{version}/")
    } else {
        format!("/{product}/{version}/{rest}")
    }
}

/// Version-independent alias of a versioned path.
#[must_use]
pub fn latest_alias(path: &str) -> String {
    replace_path_version(path, LATEST)
}

/// Whether the version segment of `path` is the `latest` token.
#[must_use]
pub fn is_latest_path(path: &str) -> bool {
    segment(path, VERSION_SEGMENT) == Some(LATEST)
}

/// Number of non-empty segments in a path. The root has depth 0.
#[must_use]
pub fn path_to_depth(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

/// Canonical form of a page path: non-empty paths end with a slash.
///
/// Borrows when `path` is already canonical.
#[must_use]
pub fn canonical_path(path: &str) -> Cow<'_, str> {
    if path.is_empty() || path.ends_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{path}/"))
    }
}

/// Append a trailing slash unless one is already present.
#[must_use]
pub fn ensure_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_owned()
    } else {
        format!("{url}/")
    }
}

/// Whether a source file path names a directory index page.
#[must_use]
pub fn is_index_page(file_path: &str) -> bool {
    ["index.mdx", "index.md"]
        .iter()
        .any(|name| file_path == *name || file_path.ends_with(&format!("/{name}")))
}

/// Classify a source file by the content root it lives under.
#[must_use]
pub fn doc_type_from_file_path(file_path: &Path) -> Option<DocType> {
    let path = file_path.to_string_lossy();
    if path.contains("/product_docs/") || path.starts_with("product_docs/") {
        Some(DocType::Doc)
    } else if path.contains("/advocacy_docs/") || path.starts_with("advocacy_docs/") {
        Some(DocType::Advocacy)
    } else {
        None
    }
}

/// Resolve `target` against `base` into an absolute path with a trailing slash.
///
/// Absolute targets replace the base. `.` and `..` segments are normalized;
/// `..` never climbs above the root.
///
/// ```
/// use vdocs_content::path::resolve_path;
///
/// assert_eq!(resolve_path("/epas/15/install/", "../upgrade"), "/epas/15/upgrade/");
/// assert_eq!(resolve_path("/epas/15/install/", "/epas/latest/old"), "/epas/latest/old/");
/// ```
#[must_use]
pub fn resolve_path(base: &str, target: &str) -> String {
    let joined = if target.starts_with('/') {
        target.to_owned()
    } else {
        format!("{base}/{target}")
    };

    let mut parts: Vec<&str> = Vec::new();
    for part in joined.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }

    if parts.is_empty() {
        "/".to_owned()
    } else {
        format!("/{}/", parts.join("/"))
    }
}
