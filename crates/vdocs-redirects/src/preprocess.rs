//! Redirect preprocessing.
//!
//! Runs once over the whole corpus, in corpus order, before any redirect rule
//! is emitted. Every declared redirect is resolved to an absolute path,
//! rewritten away from the `latest` alias of its own product, deduplicated and
//! checked against every path registered so far.
//!
//! Order matters: a redirect collides only with pages and redirects of nodes
//! processed before it (plus the node's own path and latest alias).

use std::collections::BTreeMap;
use std::fmt;

use vdocs_content::path::{
    LATEST, PRODUCT_SEGMENT, VERSION_SEGMENT, canonical_path, latest_alias, replace_path_version,
    resolve_path, segment,
};
use vdocs_content::{ContentNode, VersionError, VersionIndex, canonical_nodes};

/// What a registered path stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    /// Canonical page path or its latest alias.
    Page,
    /// Source of an accepted redirect.
    Redirect,
}

/// Every canonical path and accepted redirect source seen so far.
///
/// The first registration of a path fixes its kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidPathSet {
    paths: BTreeMap<String, PathKind>,
}

impl ValidPathSet {
    fn insert(&mut self, path: String, kind: PathKind) {
        self.paths.entry(path).or_insert(kind);
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    #[must_use]
    pub fn kind(&self, path: &str) -> Option<PathKind> {
        self.paths.get(path).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PathKind)> {
        self.paths.iter().map(|(path, &kind)| (path.as_str(), kind))
    }
}

/// A declared redirect whose source was already registered.
///
/// The redirect is still accepted; this is a warning.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RedirectCollision {
    /// Canonical path of the declaring page.
    pub page: String,
    /// Normalized redirect source.
    pub redirect: String,
    /// What the redirect collided with.
    pub kind: PathKind,
    /// Source file of the declaring page, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl fmt::Display for RedirectCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let other = match self.kind {
            PathKind::Page => "another page",
            PathKind::Redirect => "another redirect",
        };
        write!(
            f,
            "Redirect {} for page {} matches the path of {other}",
            self.redirect, self.page
        )
    }
}

/// Error returned when preprocessing cannot run.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RedirectError {
    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Result of [`preprocess_redirects`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreprocessOutcome {
    /// Every canonical path, latest alias and accepted redirect source.
    pub valid_paths: ValidPathSet,
    /// Finalized redirects per page path, for pages that declare any.
    pub redirects: BTreeMap<String, Vec<String>>,
    /// Collision warnings in corpus order.
    pub collisions: Vec<RedirectCollision>,
}

impl PreprocessOutcome {
    /// Finalized redirects of a page. Empty when it declares none.
    ///
    /// The trailing slash of `path` is optional.
    #[must_use]
    pub fn redirects_for(&self, path: &str) -> &[String] {
        self.redirects
            .get(canonical_path(path).as_ref())
            .map_or(&[], Vec::as_slice)
    }

    /// Write the finalized redirect lists back into the corpus.
    pub fn apply(&self, nodes: &mut [ContentNode]) {
        for node in nodes {
            if let Some(redirects) = self.redirects.get(canonical_path(&node.path).as_ref()) {
                node.frontmatter.redirects = Some(redirects.clone());
            }
        }
    }
}

/// Validate, normalize and deduplicate declared redirects.
///
/// Page paths are compared in canonical form, with a trailing slash.
///
/// # Errors
///
/// Returns [`RedirectError::Version`] if a doc node does not fit `versions`.
pub fn preprocess_redirects(
    nodes: &[ContentNode],
    versions: &VersionIndex,
) -> Result<PreprocessOutcome, RedirectError> {
    let nodes = canonical_nodes(nodes);
    let mut outcome = PreprocessOutcome::default();

    for node in nodes.iter().filter(|n| !n.path.is_empty()) {
        let is_latest = versions.is_latest(node)?;

        outcome
            .valid_paths
            .insert(node.path.clone(), PathKind::Page);
        if is_latest {
            outcome
                .valid_paths
                .insert(latest_alias(&node.path), PathKind::Page);
        }

        let mut accepted: Vec<String> = Vec::new();
        for declared in node.frontmatter.declared_redirects() {
            let redirect = normalize_redirect(&node.path, declared);
            if redirect == node.path || accepted.contains(&redirect) {
                continue;
            }

            if let Some(kind) = outcome.valid_paths.kind(&redirect) {
                let collision = RedirectCollision {
                    page: node.path.clone(),
                    redirect: redirect.clone(),
                    kind,
                    file: node.file_absolute_path.as_ref().map(|p| p.display().to_string()),
                };
                tracing::warn!(
                    page = %collision.page,
                    redirect = %collision.redirect,
                    file = %node.source_label(),
                    "{collision}"
                );
                outcome.collisions.push(collision);
            }
            accepted.push(redirect);
        }

        if node.frontmatter.redirects.as_ref().is_some_and(|r| !r.is_empty()) {
            for redirect in &accepted {
                outcome
                    .valid_paths
                    .insert(redirect.clone(), PathKind::Redirect);
            }
            outcome.redirects.insert(node.path.clone(), accepted);
        }
    }

    tracing::debug!(
        valid_paths = outcome.valid_paths.len(),
        pages_with_redirects = outcome.redirects.len(),
        collisions = outcome.collisions.len(),
        "Redirects preprocessed"
    );
    Ok(outcome)
}

/// Resolve a declared redirect against its page.
///
/// A redirect into the `latest` alias of the page's own product is pinned to
/// the page's version, so a copied `latest` redirect never leaks into an older
/// version.
fn normalize_redirect(page_path: &str, declared: &str) -> String {
    let resolved = resolve_path(page_path, declared);

    let same_product = segment(&resolved, PRODUCT_SEGMENT) == segment(page_path, PRODUCT_SEGMENT);
    let page_version = segment(page_path, VERSION_SEGMENT).filter(|v| !v.is_empty());
    match page_version {
        Some(version) if same_product && segment(&resolved, VERSION_SEGMENT) == Some(LATEST) => {
            replace_path_version(&resolved, version)
        }
        _ => resolved,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn preprocess(nodes: &[ContentNode]) -> PreprocessOutcome {
        preprocess_redirects(nodes, &VersionIndex::build(nodes)).unwrap()
    }

    #[test]
    fn test_normalize_relative_redirect() {
        assert_eq!(
            normalize_redirect("/epas/15/install/", "../setup"),
            "/epas/15/setup/"
        );
        assert_eq!(normalize_redirect("/epas/15/install/", "old"), "/epas/15/install/old/");
    }

    #[test]
    fn test_latest_redirect_pinned_to_page_version() {
        let nodes = vec![
            ContentNode::doc("pem", "9", "release-notes"),
            ContentNode::doc("pem", "8", "release-notes").with_redirects(["/pem/latest/notes"]),
        ];

        let outcome = preprocess(&nodes);

        assert_eq!(outcome.redirects_for("/pem/8/release-notes/"), ["/pem/8/notes/".to_owned()]);
    }

    #[test]
    fn test_latest_redirect_of_other_product_is_kept() {
        let nodes = vec![ContentNode::doc("pem", "8", "notes").with_redirects(["/epas/latest/notes"])];

        let outcome = preprocess(&nodes);

        assert_eq!(outcome.redirects_for("/pem/8/notes/"), ["/epas/latest/notes/".to_owned()]);
    }

    #[test]
    fn test_self_redirect_dropped() {
        let nodes = vec![ContentNode::doc("pem", "8", "notes").with_redirects(["/pem/latest/notes/", "."])];

        let outcome = preprocess(&nodes);

        assert!(outcome.redirects_for("/pem/8/notes/").is_empty());
        assert!(outcome.collisions.is_empty());
    }

    #[test]
    fn test_unslashed_page_path_is_canonical() {
        let nodes = vec![
            ContentNode {
                path: "/pem/9/alerts".to_owned(),
                ..ContentNode::doc("pem", "9", "alerts")
            }
            .with_redirects(["/pem/9/alerts", "/pem/latest/alerts"]),
        ];

        let outcome = preprocess(&nodes);

        assert!(outcome.redirects_for("/pem/9/alerts").is_empty());
        assert!(outcome.valid_paths.contains("/pem/9/alerts/"));
        assert!(outcome.valid_paths.contains("/pem/latest/alerts/"));
        assert!(!outcome.valid_paths.contains("/pem/9/alerts"));
    }

    #[test]
    fn test_unslashed_page_path_collides() {
        let nodes = vec![
            ContentNode {
                path: "/guides/a".to_owned(),
                ..ContentNode::default()
            },
            ContentNode::new("/guides/b/").with_redirects(["/guides/a"]),
        ];

        let outcome = preprocess(&nodes);

        assert_eq!(outcome.collisions.len(), 1);
        assert_eq!(outcome.collisions[0].redirect, "/guides/a/");
        assert_eq!(outcome.collisions[0].kind, PathKind::Page);
    }

    #[test]
    fn test_duplicates_within_page_keep_first_order() {
        let nodes = vec![ContentNode::new("/guides/intro/").with_redirects([
            "/b",
            "/a/",
            "/b/",
            "",
            "/a",
        ])];

        let outcome = preprocess(&nodes);

        assert_eq!(
            outcome.redirects_for("/guides/intro/"),
            ["/b/".to_owned(), "/a/".to_owned()]
        );
        assert!(outcome.collisions.is_empty());
    }

    #[test]
    fn test_collisions_with_page_and_redirect() {
        let nodes = vec![
            ContentNode::new("/a/"),
            ContentNode::new("/b/").with_redirects(["/old/"]),
            ContentNode::new("/c/").with_redirects(["/a/", "/old/", "/fresh/"]),
        ];

        let outcome = preprocess(&nodes);

        let found: Vec<_> = outcome
            .collisions
            .iter()
            .map(|c| (c.page.as_str(), c.redirect.as_str(), c.kind))
            .collect();
        assert_eq!(
            found,
            vec![
                ("/c/", "/a/", PathKind::Page),
                ("/c/", "/old/", PathKind::Redirect),
            ]
        );
        // Colliding redirects are still accepted
        assert_eq!(outcome.redirects_for("/c/").len(), 3);
    }

    #[test]
    fn test_collision_only_against_earlier_nodes() {
        let nodes = vec![
            ContentNode::new("/b/").with_redirects(["/a/"]),
            ContentNode::new("/a/"),
        ];

        let outcome = preprocess(&nodes);

        assert!(outcome.collisions.is_empty());
        assert_eq!(outcome.valid_paths.kind("/a/"), Some(PathKind::Redirect));
    }

    #[test]
    fn test_redirect_to_own_latest_alias_collides() {
        let nodes = vec![ContentNode::doc("epas", "15", "a").with_redirects(["/epas/latest/a/"])];
        let versions = VersionIndex::build(&nodes);

        // Pinned to 15, which is the page itself
        let outcome = preprocess_redirects(&nodes, &versions).unwrap();
        assert!(outcome.collisions.is_empty());
        assert!(outcome.valid_paths.contains("/epas/latest/a/"));

        let other = vec![
            ContentNode::doc("epas", "15", "a"),
            ContentNode::new("/guides/x/").with_redirects(["/epas/latest/a/"]),
        ];
        let outcome = preprocess(&other);
        assert_eq!(outcome.collisions.len(), 1);
        assert_eq!(outcome.collisions[0].kind, PathKind::Page);
    }

    #[test]
    fn test_preprocessing_is_idempotent() {
        let mut nodes = vec![
            ContentNode::doc("epas", "14", "B").with_redirects(["/epas/latest/A"]),
            ContentNode::doc("epas", "15", "C").with_redirects(["/epas/latest/A", "../B", "/epas/15/A/"]),
            ContentNode::new("/guides/").with_redirects(["/epas/15/C/"]),
        ];
        let versions = VersionIndex::build(&nodes);

        let first = preprocess_redirects(&nodes, &versions).unwrap();
        first.apply(&mut nodes);
        let second = preprocess_redirects(&nodes, &versions).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            nodes[1].frontmatter.redirects,
            Some(vec!["/epas/15/A/".to_owned(), "/epas/15/B/".to_owned()])
        );
    }

    #[test]
    fn test_input_left_untouched() {
        let nodes = vec![ContentNode::doc("pem", "8", "notes").with_redirects(["/pem/latest/old"])];

        let _ = preprocess(&nodes);

        assert_eq!(nodes[0].frontmatter.redirects, Some(vec!["/pem/latest/old".to_owned()]));
    }

    #[test]
    fn test_unknown_product_fails_fast() {
        let nodes = vec![ContentNode::doc("epas", "15", "a")];

        let err = preprocess_redirects(&nodes, &VersionIndex::default()).unwrap_err();

        assert!(matches!(err, RedirectError::Version(VersionError::UnknownProduct { .. })));
    }

    #[test]
    fn test_collision_display() {
        let collision = RedirectCollision {
            page: "/c/".to_owned(),
            redirect: "/a/".to_owned(),
            kind: PathKind::Redirect,
            file: None,
        };
        assert_eq!(
            collision.to_string(),
            "Redirect /a/ for page /c/ matches the path of another redirect"
        );
    }
}
