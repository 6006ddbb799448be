//! Page frontmatter.
//!
//! Frontmatter is the YAML block at the top of a content file. A handful of
//! keys drive structure and redirects and are typed on [`Frontmatter`]; every
//! other key is kept verbatim in [`Frontmatter::fields`] so it can take part in
//! metadata inheritance.
//!
//! # No-value sentinel
//!
//! A `null` value in a [`MetadataLayer`] means "no opinion": it is dropped
//! before layers are merged and never hides a value inherited from a lower
//! layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One layer of page metadata, keyed by frontmatter field name.
pub type MetadataLayer = BTreeMap<String, serde_json::Value>;

/// Parsed frontmatter of a content item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Defaults inherited by this page and every page below it.
    #[serde(
        default,
        rename = "directoryDefaults",
        skip_serializing_if = "Option::is_none"
    )]
    pub directory_defaults: Option<MetadataLayer>,

    /// Paths that should redirect to this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirects: Option<Vec<String>>,

    /// Pre-versioning paths that should redirect to this page.
    #[serde(
        default,
        rename = "legacyRedirects",
        alias = "legacyRedirectsGenerated",
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_redirects: Option<Vec<String>>,

    /// Ordering of child pages by slug, used by the navigation ordering step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Vec<String>>,

    /// All remaining frontmatter keys.
    #[serde(flatten)]
    pub fields: MetadataLayer,
}

impl Frontmatter {
    /// Parse frontmatter from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or not a mapping.
    pub fn from_yaml(content: &str) -> Result<Self, FrontmatterError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed)
            .map_err(|e| FrontmatterError::Parse(format!("Invalid YAML: {e}")))
    }

    /// Declared redirects with blank entries removed.
    ///
    /// An absent list and an empty list are the same thing here.
    pub fn declared_redirects(&self) -> impl Iterator<Item = &str> {
        non_blank(self.redirects.as_deref())
    }

    /// Declared legacy redirects with blank entries removed.
    pub fn declared_legacy_redirects(&self) -> impl Iterator<Item = &str> {
        non_blank(self.legacy_redirects.as_deref())
    }
}

fn non_blank(list: Option<&[String]>) -> impl Iterator<Item = &str> {
    list.unwrap_or_default()
        .iter()
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Typed access to the render-facing keys of a metadata layer.
pub trait PageFields {
    /// Look up a raw value, treating `null` as absent.
    fn value(&self, key: &str) -> Option<&serde_json::Value>;

    /// Page title.
    fn title(&self) -> Option<&str> {
        self.value("title").and_then(serde_json::Value::as_str)
    }

    /// Short title used in navigation menus.
    fn nav_title(&self) -> Option<&str> {
        self.value("navTitle").and_then(serde_json::Value::as_str)
    }

    fn description(&self) -> Option<&str> {
        self.value("description").and_then(serde_json::Value::as_str)
    }

    fn icon_name(&self) -> Option<&str> {
        self.value("iconName").and_then(serde_json::Value::as_str)
    }

    fn hide_version(&self) -> Option<bool> {
        self.value("hideVersion").and_then(serde_json::Value::as_bool)
    }

    fn display_banner(&self) -> Option<&str> {
        self.value("displayBanner").and_then(serde_json::Value::as_str)
    }

    /// Whether the page should carry an "interactive" badge.
    ///
    /// An explicit `showInteractiveBadge` wins; otherwise any truthy legacy
    /// `katacodaPanel` value marks the page interactive.
    fn interactive(&self) -> bool {
        if let Some(badge) = self.value("showInteractiveBadge") {
            return is_truthy(badge);
        }
        self.value("katacodaPanel").is_some_and(is_truthy)
    }
}

impl PageFields for MetadataLayer {
    fn value(&self, key: &str) -> Option<&serde_json::Value> {
        self.get(key).filter(|v| !v.is_null())
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// Split a content file into its frontmatter block and body.
///
/// The frontmatter must start on the first line with `---` and end with a
/// line containing only `---`. Returns `None` for the frontmatter when the
/// file has no such block.
#[must_use]
pub fn split_frontmatter(source: &str) -> (Option<&str>, &str) {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let Some(rest) = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    else {
        return (None, source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let body = &rest[offset + line.len()..];
            return (Some(&rest[..offset]), body);
        }
        offset += line.len();
    }

    (None, source)
}

/// Error type for frontmatter parsing.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    /// YAML parsing error.
    #[error("{0}")]
    Parse(String),
}
