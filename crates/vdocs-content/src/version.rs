//! Per-product version index.
//!
//! Versions are ordered newest first using a numeric-aware comparison, so
//! `"10"` sorts before `"9"` and `"2.10"` before `"2.2"`. The first entry of a
//! product's list is its "latest" version.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::ContentNode;

/// Ordered versions per product, newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VersionIndex {
    products: BTreeMap<String, Vec<String>>,
}

impl VersionIndex {
    /// Build the index from every product documentation node in the corpus.
    ///
    /// Non-doc nodes are ignored. Versions are deduplicated by exact match.
    #[must_use]
    pub fn build(nodes: &[ContentNode]) -> Self {
        let mut products: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for node in nodes.iter().filter(|n| n.is_doc()) {
            let (Some(product), Some(version)) = (&node.product, &node.version) else {
                continue;
            };
            let versions = products.entry(product.clone()).or_default();
            if !versions.contains(version) {
                versions.push(version.clone());
            }
        }

        for versions in products.values_mut() {
            sort_versions_desc(versions);
        }

        tracing::debug!(product_count = products.len(), "Version index built");
        Self { products }
    }

    /// Versions of a product, newest first.
    #[must_use]
    pub fn versions(&self, product: &str) -> Option<&[String]> {
        self.products.get(product).map(Vec::as_slice)
    }

    /// Newest version of a product.
    #[must_use]
    pub fn latest(&self, product: &str) -> Option<&str> {
        self.versions(product)?.first().map(String::as_str)
    }

    /// Iterate products and their versions in product name order.
    pub fn products(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.products
            .iter()
            .map(|(product, versions)| (product.as_str(), versions.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Whether `node` belongs to its product's newest version.
    ///
    /// Non-doc nodes are never latest.
    ///
    /// # Errors
    ///
    /// A doc node without product or version, or whose product is missing from
    /// the index, violates the corpus contract and is reported as an error.
    pub fn is_latest(&self, node: &ContentNode) -> Result<bool, VersionError> {
        if !node.is_doc() {
            return Ok(false);
        }
        let (Some(product), Some(version)) = (&node.product, &node.version) else {
            return Err(VersionError::MissingVersionInfo(node.path.clone()));
        };
        let latest = self
            .latest(product)
            .ok_or_else(|| VersionError::UnknownProduct {
                product: product.clone(),
                path: node.path.clone(),
            })?;
        Ok(latest == version)
    }
}

/// Error returned when a node does not fit the version index.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VersionError {
    /// Doc node without product or version.
    #[error("Doc page {0} has no product or version")]
    MissingVersionInfo(String),
    /// Product not present in the index.
    #[error("Product {product} of page {path} is not in the version index")]
    UnknownProduct {
        /// Product name.
        product: String,
        /// Page path.
        path: String,
    },
}

/// Sort versions newest first.
pub fn sort_versions_desc(versions: &mut [String]) {
    versions.sort_by(|a, b| compare_versions(b, a));
}

/// Numeric-aware string comparison.
///
/// Both strings are split into runs of ASCII digits and runs of everything
/// else. Digit runs compare by integer value, other runs case-insensitively.
/// Strings whose runs all compare equal fall back to a byte comparison.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = Runs::new(a);
    let mut right = Runs::new(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = compare_runs(l, r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn compare_runs(l: &str, r: &str) -> Ordering {
    let l_digit = l.starts_with(|c: char| c.is_ascii_digit());
    let r_digit = r.starts_with(|c: char| c.is_ascii_digit());

    match (l_digit, r_digit) {
        (true, true) => {
            let l = l.trim_start_matches('0');
            let r = r.trim_start_matches('0');
            l.len().cmp(&r.len()).then_with(|| l.cmp(r))
        }
        // Digits sort before other characters
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        // Exact case only breaks ties once every run compared equal
        (false, false) => l.to_lowercase().cmp(&r.to_lowercase()),
    }
}

/// Iterator over alternating digit / non-digit runs of a string.
struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Runs<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;
        let digit = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(run)
    }
}
