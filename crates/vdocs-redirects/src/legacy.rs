//! Redirects from pre-versioning URLs.

use std::sync::LazyLock;

use regex::Regex;

use crate::rule::{RedirectRegistry, RedirectRule};

/// Version run in the middle of a path, e.g. `/9.6/`.
static MIDDLE_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+(\.?\d+)*/").expect("invalid middle version regex"));

/// Version run at the end of a path, e.g. `/9.6`.
static TRAILING_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+(\.?\d+)*$").expect("invalid trailing version regex"));

/// Replace the version run of a legacy path with `latest`.
///
/// Only the first middle run is replaced, then a trailing run if any remains.
///
/// ```
/// use vdocs_redirects::legacy_path_to_latest;
///
/// assert_eq!(legacy_path_to_latest("/edb-docs/d/pem/9.6/user/"), "/edb-docs/d/pem/latest/user/");
/// assert_eq!(legacy_path_to_latest("/edb-docs/p/pem/9.6"), "/edb-docs/p/pem/latest");
/// ```
#[must_use]
pub fn legacy_path_to_latest(path: &str) -> String {
    let middle = MIDDLE_VERSION_RE.replace(path, "/latest/");
    TRAILING_VERSION_RE.replace(&middle, "/latest").into_owned()
}

/// Register permanent redirects from legacy URLs.
///
/// Every source redirects to `to_path`. With `to_latest_path`, the source's
/// `latest` form also redirects there. Legacy rules are server-side only.
pub fn configure_legacy_redirects<R>(
    registry: &mut R,
    to_path: &str,
    to_latest_path: Option<&str>,
    redirects: &[String],
) where
    R: RedirectRegistry + ?Sized,
{
    for from in redirects {
        registry.create_redirect(legacy_rule(from.clone(), to_path));
        if let Some(to_latest) = to_latest_path {
            registry.create_redirect(legacy_rule(legacy_path_to_latest(from), to_latest));
        }
    }
}

fn legacy_rule(from: String, to: &str) -> RedirectRule {
    RedirectRule::temporary(from, to).permanent(true).server_only()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_legacy_path_to_latest() {
        assert_eq!(
            legacy_path_to_latest(
                "/edb-docs/d/edb-postgres-advanced-server/user-guides/user-guide/12/toc.html"
            ),
            "/edb-docs/d/edb-postgres-advanced-server/user-guides/user-guide/latest/toc.html"
        );
        assert_eq!(
            legacy_path_to_latest("/edb-docs/p/edb-postgres-advanced-server/12"),
            "/edb-docs/p/edb-postgres-advanced-server/latest"
        );
        assert_eq!(legacy_path_to_latest("/docs/no-version/"), "/docs/no-version/");
    }

    #[test]
    fn test_only_first_middle_run_replaced() {
        assert_eq!(legacy_path_to_latest("/a/1.2/b/3/c/"), "/a/latest/b/3/c/");
    }

    #[test]
    fn test_middle_and_trailing_runs() {
        assert_eq!(legacy_path_to_latest("/a/1/b/2"), "/a/latest/b/latest");
    }

    #[test]
    fn test_configure_legacy_redirects() {
        let mut registry: Vec<RedirectRule> = Vec::new();
        let sources = vec!["/edb-docs/d/pem/9.6/user/".to_owned()];

        configure_legacy_redirects(
            &mut registry,
            "/pem/9/user/",
            Some("/pem/latest/user/"),
            &sources,
        );

        let found: Vec<_> = registry
            .iter()
            .map(|r| (r.from_path.as_str(), r.to_path.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("/edb-docs/d/pem/9.6/user/", "/pem/9/user/"),
                ("/edb-docs/d/pem/latest/user/", "/pem/latest/user/"),
            ]
        );
        assert!(registry.iter().all(|r| r.is_permanent && !r.redirect_in_browser && !r.force));
    }

    #[test]
    fn test_configure_legacy_without_latest_target() {
        let mut registry: Vec<RedirectRule> = Vec::new();
        let sources = vec!["/old/8/a/".to_owned(), "/old/8/b/".to_owned()];

        configure_legacy_redirects(&mut registry, "/pem/8/a/", None, &sources);

        assert_eq!(registry.len(), 2);
        assert!(registry.iter().all(|r| r.to_path == "/pem/8/a/"));
    }
}
