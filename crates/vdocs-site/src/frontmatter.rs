//! Effective frontmatter with directory defaults inheritance.
//!
//! # Precedence
//!
//! Highest to lowest:
//! 1. The page's own frontmatter fields
//! 2. The page's own `directoryDefaults`
//! 3. The nearest ancestor page's `directoryDefaults`
//! 4. ...and so on up to the root
//!
//! Ancestors without content are skipped. A `null` value in any layer is
//! "no opinion" and falls through to the next layer.

use serde::Serialize;
use vdocs_content::{MetadataLayer, PageFields};

use crate::tree::{ContentTree, NodeId};

/// Flattened effective metadata of a page.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedFrontmatter {
    fields: MetadataLayer,
}

impl ResolvedFrontmatter {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn fields(&self) -> &MetadataLayer {
        &self.fields
    }

    #[must_use]
    pub fn into_fields(self) -> MetadataLayer {
        self.fields
    }
}

impl PageFields for ResolvedFrontmatter {
    fn value(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.value(key)
    }
}

/// Metadata layers for a page, highest precedence first.
///
/// Returns `None` if the node has no content.
#[must_use]
pub fn frontmatter_layers(tree: &ContentTree, id: NodeId) -> Option<Vec<&MetadataLayer>> {
    let content = tree.node(id).content.as_ref()?;

    let mut layers = vec![&content.frontmatter.fields];
    layers.extend(content.frontmatter.directory_defaults.as_ref());
    layers.extend(
        tree.ancestors(id)
            .filter_map(|ancestor| tree.node(ancestor).content.as_ref())
            .filter_map(|c| c.frontmatter.directory_defaults.as_ref()),
    );

    Some(layers)
}

/// Merge layers ordered highest precedence first.
///
/// The first non-null value seen for a key wins.
#[must_use]
pub fn merge_layers<'a>(layers: impl IntoIterator<Item = &'a MetadataLayer>) -> MetadataLayer {
    let mut merged = MetadataLayer::new();
    for layer in layers {
        for (key, value) in layer.iter().filter(|(_, v)| !v.is_null()) {
            merged
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
    merged
}

/// Compute the effective frontmatter of a page.
///
/// Returns `None` for structural nodes without content.
#[must_use]
pub fn resolve_frontmatter(tree: &ContentTree, id: NodeId) -> Option<ResolvedFrontmatter> {
    let layers = frontmatter_layers(tree, id)?;
    Some(ResolvedFrontmatter {
        fields: merge_layers(layers),
    })
}
