//! Content corpus records.

use std::borrow::Cow;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::frontmatter::Frontmatter;
use crate::path::{canonical_path, ensure_trailing_slash};

/// Classification of a content item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// Versioned product documentation. Included in the version index.
    Doc,
    /// Unversioned advocacy content (guides, tutorials).
    Advocacy,
}

/// One item of the content corpus.
///
/// Paths are canonical URL paths with a trailing slash. Versioned product
/// documentation is shaped `/<product>/<version>/<rest>/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    /// Canonical URL path. A missing trailing slash is added on deserialize.
    #[serde(deserialize_with = "deserialize_path")]
    pub path: String,
    /// Content classification, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<DocType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub frontmatter: Frontmatter,
    /// Source file, used in diagnostics only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_absolute_path: Option<PathBuf>,
}

impl ContentNode {
    /// Create a node with the given path and empty frontmatter.
    ///
    /// The path is normalized to end with a slash.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: ensure_trailing_slash(path),
            ..Default::default()
        }
    }

    /// Create a product documentation node at `/<product>/<version>/<rest>/`.
    #[must_use]
    pub fn doc(product: &str, version: &str, rest: &str) -> Self {
        let rest = rest.trim_matches('/');
        let path = if rest.is_empty() {
            format!("/{product}/{version}/")
        } else {
            format!("/{product}/{version}/{rest}/")
        };
        Self {
            path,
            doc_type: Some(DocType::Doc),
            product: Some(product.to_owned()),
            version: Some(version.to_owned()),
            ..Default::default()
        }
    }

    /// Replace the frontmatter.
    #[must_use]
    pub fn with_frontmatter(mut self, frontmatter: Frontmatter) -> Self {
        self.frontmatter = frontmatter;
        self
    }

    /// Replace the declared redirects.
    #[must_use]
    pub fn with_redirects<I, S>(mut self, redirects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frontmatter.redirects = Some(redirects.into_iter().map(Into::into).collect());
        self
    }

    /// Whether this node is versioned product documentation.
    #[must_use]
    pub fn is_doc(&self) -> bool {
        self.doc_type == Some(DocType::Doc)
    }

    /// Human-readable source location for diagnostics.
    #[must_use]
    pub fn source_label(&self) -> String {
        self.file_absolute_path
            .as_ref()
            .map_or_else(|| self.path.clone(), |p| p.display().to_string())
    }
}

fn deserialize_path<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let path = String::deserialize(deserializer)?;
    Ok(canonical_path(&path).into_owned())
}

/// The corpus with every non-empty path in canonical form.
///
/// Borrows `nodes` when no path needs a trailing slash.
#[must_use]
pub fn canonical_nodes(nodes: &[ContentNode]) -> Cow<'_, [ContentNode]> {
    if nodes
        .iter()
        .all(|n| matches!(canonical_path(&n.path), Cow::Borrowed(_)))
    {
        return Cow::Borrowed(nodes);
    }

    Cow::Owned(
        nodes
            .iter()
            .map(|node| ContentNode {
                path: canonical_path(&node.path).into_owned(),
                ..node.clone()
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_normalizes_trailing_slash() {
        assert_eq!(ContentNode::new("/guides/intro").path, "/guides/intro/");
        assert_eq!(ContentNode::new("/").path, "/");
    }

    #[test]
    fn test_doc_builds_versioned_path() {
        let node = ContentNode::doc("epas", "15", "install/linux");
        assert_eq!(node.path, "/epas/15/install/linux/");
        assert_eq!(node.product.as_deref(), Some("epas"));
        assert_eq!(node.version.as_deref(), Some("15"));
        assert!(node.is_doc());

        assert_eq!(ContentNode::doc("epas", "15", "").path, "/epas/15/");
    }

    #[test]
    fn test_deserialize_camel_case_corpus_entry() {
        let json = r#"{
            "path": "/pem/9/alerts/",
            "docType": "doc",
            "product": "pem",
            "version": "9",
            "frontmatter": {"title": "Alerts", "redirects": ["/pem/latest/alarms"]}
        }"#;
        let node: ContentNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.doc_type, Some(DocType::Doc));
        assert_eq!(node.frontmatter.redirects, Some(vec!["/pem/latest/alarms".to_owned()]));
        assert_eq!(node.frontmatter.fields.get("title"), Some(&serde_json::json!("Alerts")));
    }

    #[test]
    fn test_deserialize_adds_trailing_slash() {
        let node: ContentNode =
            serde_json::from_str(r#"{"path": "/pem/9/alerts", "docType": "doc"}"#).unwrap();
        assert_eq!(node.path, "/pem/9/alerts/");
    }

    #[test]
    fn test_canonical_nodes() {
        let canonical = vec![ContentNode::new("/a/"), ContentNode::default()];
        assert!(matches!(canonical_nodes(&canonical), Cow::Borrowed(_)));

        let raw = vec![
            ContentNode {
                path: "/guides/a".to_owned(),
                ..ContentNode::default()
            },
            ContentNode::new("/guides/b/"),
        ];
        let paths: Vec<_> = canonical_nodes(&raw).iter().map(|n| n.path.clone()).collect();
        assert_eq!(paths, vec!["/guides/a/", "/guides/b/"]);
    }

    #[test]
    fn test_source_label_prefers_file_path() {
        let mut node = ContentNode::new("/a/");
        assert_eq!(node.source_label(), "/a/");
        node.file_absolute_path = Some(PathBuf::from("/src/a/index.mdx"));
        assert_eq!(node.source_label(), "/src/a/index.mdx");
    }
}
