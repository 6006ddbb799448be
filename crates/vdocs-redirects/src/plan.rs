//! Whole-corpus redirect planning.
//!
//! Ties the passes together: preprocess every declared redirect, work out
//! where each page lives in every version of its product, then configure the
//! rules page by page in corpus order.

use std::collections::{HashMap, HashSet};

use vdocs_content::path::{latest_alias, replace_path_version};
use vdocs_content::{ContentNode, VersionIndex, canonical_nodes};

use crate::configure::configure_redirects;
use crate::legacy::configure_legacy_redirects;
use crate::preprocess::{PreprocessOutcome, RedirectCollision, RedirectError, preprocess_redirects};
use crate::rule::RedirectTable;

/// Where a page lives in each version of its product.
///
/// A newer version counts as carrying the page if it has a page at the same
/// relative path, or a page that declares that path as a redirect.
#[derive(Debug)]
pub struct PathVersions<'a> {
    versions: &'a VersionIndex,
    pages: HashSet<&'a str>,
    redirect_targets: HashMap<&'a str, &'a str>,
}

impl<'a> PathVersions<'a> {
    /// Index page paths and finalized redirects.
    ///
    /// `nodes` are expected in canonical form, see [`canonical_nodes`].
    ///
    /// When two pages declare the same redirect the first one in corpus order
    /// is used.
    #[must_use]
    pub fn build(
        nodes: &'a [ContentNode],
        versions: &'a VersionIndex,
        outcome: &'a PreprocessOutcome,
    ) -> Self {
        let pages = nodes.iter().map(|n| n.path.as_str()).collect();

        let mut redirect_targets = HashMap::new();
        for node in nodes {
            for redirect in outcome.redirects_for(&node.path) {
                redirect_targets
                    .entry(redirect.as_str())
                    .or_insert(node.path.as_str());
            }
        }

        Self {
            versions,
            pages,
            redirect_targets,
        }
    }

    /// One candidate target per version of the node's product, newest first.
    ///
    /// Empty for nodes outside versioned product documentation.
    #[must_use]
    pub fn for_node(&self, node: &ContentNode) -> Vec<Option<String>> {
        let Some(versions) = node
            .is_doc()
            .then_some(node.product.as_deref())
            .flatten()
            .and_then(|product| self.versions.versions(product))
        else {
            return Vec::new();
        };

        versions
            .iter()
            .map(|version| {
                let candidate = replace_path_version(&node.path, version);
                if self.pages.contains(candidate.as_str()) {
                    Some(candidate)
                } else {
                    self.redirect_targets
                        .get(candidate.as_str())
                        .map(|&page| page.to_owned())
                }
            })
            .collect()
    }
}

/// Redirect rules for the whole corpus.
#[derive(Clone, Debug, Default)]
pub struct RedirectPlan {
    /// Final rules, one per source path.
    pub table: RedirectTable,
    /// Collision warnings from preprocessing.
    pub collisions: Vec<RedirectCollision>,
}

/// Plan every redirect of the corpus.
///
/// # Errors
///
/// Returns [`RedirectError::Version`] if a doc node does not fit `versions`.
pub fn plan_redirects(
    nodes: &[ContentNode],
    versions: &VersionIndex,
) -> Result<RedirectPlan, RedirectError> {
    let nodes = canonical_nodes(nodes);
    let outcome = preprocess_redirects(&nodes, versions)?;
    let path_versions = PathVersions::build(&nodes, versions, &outcome);

    let mut table = RedirectTable::new();
    for node in nodes.iter().filter(|n| !n.path.is_empty()) {
        let is_latest = versions.is_latest(node)?;

        configure_redirects(
            &mut table,
            &node.path,
            outcome.redirects_for(&node.path),
            is_latest,
            &path_versions.for_node(node),
        );

        let legacy: Vec<String> = node
            .frontmatter
            .declared_legacy_redirects()
            .map(str::to_owned)
            .collect();
        if !legacy.is_empty() {
            let to_latest = is_latest.then(|| latest_alias(&node.path));
            configure_legacy_redirects(&mut table, &node.path, to_latest.as_deref(), &legacy);
        }
    }

    tracing::info!(
        rules = table.len(),
        collisions = outcome.collisions.len(),
        "Redirects planned"
    );

    Ok(RedirectPlan {
        table,
        collisions: outcome.collisions,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vdocs_content::Frontmatter;

    use super::*;

    fn netlify_lines(plan: &RedirectPlan) -> Vec<String> {
        plan.table.to_netlify().lines().map(str::to_owned).collect()
    }

    #[test]
    fn test_plan_latest_aliasing_example() {
        let nodes = vec![
            ContentNode::doc("epas", "14", "B").with_redirects(["/epas/latest/A"]),
            ContentNode::doc("epas", "15", "C").with_redirects(["/epas/latest/A", "/epas/latest/B"]),
        ];
        let versions = VersionIndex::build(&nodes);

        let plan = plan_redirects(&nodes, &versions).unwrap();

        assert_eq!(
            netlify_lines(&plan),
            vec![
                "/epas/14/A/ /epas/14/B/ 301",
                "/epas/15/C/ /epas/latest/C/ 302!",
                "/epas/15/A/ /epas/latest/C/ 302",
                "/epas/15/B/ /epas/latest/C/ 302",
                "/epas/latest/A/ /epas/latest/C/ 302",
                "/epas/latest/B/ /epas/latest/C/ 302",
            ]
        );
        assert!(plan.collisions.is_empty());
    }

    #[test]
    fn test_path_versions_counts_newer_redirects() {
        let nodes = vec![
            ContentNode::doc("epas", "14", "B").with_redirects(["/epas/latest/A"]),
            ContentNode::doc("epas", "14", "D"),
            ContentNode::doc("epas", "15", "C").with_redirects(["/epas/latest/B"]),
            ContentNode::doc("epas", "15", "D"),
        ];
        let versions = VersionIndex::build(&nodes);
        let outcome = preprocess_redirects(&nodes, &versions).unwrap();

        let path_versions = PathVersions::build(&nodes, &versions, &outcome);

        assert_eq!(
            path_versions.for_node(&nodes[0]),
            vec![Some("/epas/15/C/".to_owned()), Some("/epas/14/B/".to_owned())]
        );
        assert_eq!(
            path_versions.for_node(&nodes[1]),
            vec![Some("/epas/15/D/".to_owned()), Some("/epas/14/D/".to_owned())]
        );
        assert_eq!(path_versions.for_node(&ContentNode::new("/guides/")), Vec::new());
    }

    #[test]
    fn test_dead_end_page_answers_latest_alias() {
        let nodes = vec![
            ContentNode::doc("pem", "8", "release-notes"),
            ContentNode::doc("pem", "9", "index-only"),
        ];
        let versions = VersionIndex::build(&nodes);

        let plan = plan_redirects(&nodes, &versions).unwrap();

        let rule = plan.table.get("/pem/latest/release-notes/").unwrap();
        assert_eq!(rule.to_path, "/pem/8/release-notes/");
        assert!(!rule.is_permanent);
    }

    #[test]
    fn test_plan_legacy_redirects() {
        let frontmatter =
            Frontmatter::from_yaml("legacyRedirects:\n  - /edb-docs/d/pem/9.6/user/").unwrap();
        let nodes = vec![ContentNode::doc("pem", "9", "user").with_frontmatter(frontmatter)];
        let versions = VersionIndex::build(&nodes);

        let plan = plan_redirects(&nodes, &versions).unwrap();

        assert_eq!(
            netlify_lines(&plan),
            vec![
                "/pem/9/user/ /pem/latest/user/ 302!",
                "/edb-docs/d/pem/9.6/user/ /pem/9/user/ 301",
                "/edb-docs/d/pem/latest/user/ /pem/latest/user/ 301",
            ]
        );
    }

    #[test]
    fn test_unslashed_paths_do_not_loop() {
        let json = r#"[{
            "path": "/pem/9/alerts",
            "docType": "doc",
            "product": "pem",
            "version": "9",
            "frontmatter": {"redirects": ["/pem/9/alerts", "/pem/latest/alerts"]}
        }]"#;
        let from_json: Vec<ContentNode> = serde_json::from_str(json).unwrap();
        let literal = vec![ContentNode {
            path: "/pem/9/alerts".to_owned(),
            ..from_json[0].clone()
        }];

        for nodes in [from_json, literal] {
            let versions = VersionIndex::build(&nodes);
            let plan = plan_redirects(&nodes, &versions).unwrap();

            assert_eq!(netlify_lines(&plan), vec!["/pem/9/alerts/ /pem/latest/alerts/ 302!"]);
            assert!(plan.collisions.is_empty());
        }
    }

    #[test]
    fn test_single_root_node_has_no_redirects() {
        let nodes = vec![ContentNode::new("/")];
        let versions = VersionIndex::build(&nodes);

        let plan = plan_redirects(&nodes, &versions).unwrap();

        assert!(versions.is_empty());
        assert!(plan.table.is_empty());
        assert!(plan.collisions.is_empty());
    }

    #[test]
    fn test_plan_reports_collisions() {
        let nodes = vec![
            ContentNode::new("/guides/a/"),
            ContentNode::new("/guides/b/").with_redirects(["/guides/a/"]),
        ];
        let versions = VersionIndex::build(&nodes);

        let plan = plan_redirects(&nodes, &versions).unwrap();

        assert_eq!(plan.collisions.len(), 1);
        assert_eq!(
            plan.table.get("/guides/a/").map(|r| r.to_path.as_str()),
            Some("/guides/b/")
        );
    }
}
