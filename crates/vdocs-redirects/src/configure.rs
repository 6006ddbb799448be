//! Redirect rules for a single page.
//!
//! # Latest aliasing
//!
//! Maintainers declare one redirect per page move, usually copied in its
//! `latest` form. Preprocessing pins such redirects to the declaring page's
//! version. This module derives the rest:
//!
//! - The product's latest version lives at `/<product>/latest/...`; its
//!   versioned path is force-redirected there.
//! - The newest version that still carries a page answers its old latest
//!   alias, so a stale `latest` link does not 404 once newer versions drop it.
//! - For either of those pages, every declared redirect also gets its
//!   `latest` form pointing at the same target.
//!
//! ```text
//! /epas/14/B   redirects: [/epas/latest/A]
//! /epas/15/C   redirects: [/epas/latest/A, /epas/latest/B]   (15 is latest)
//!
//! /epas/15/C/      -> /epas/latest/C/   (forced)
//! /epas/15/A/      -> /epas/latest/C/
//! /epas/15/B/      -> /epas/latest/C/
//! /epas/latest/A/  -> /epas/latest/C/
//! /epas/latest/B/  -> /epas/latest/C/
//! /epas/14/A/      -> /epas/14/B/       (permanent)
//! ```

use vdocs_content::path::{is_latest_path, latest_alias};

use crate::rule::{RedirectRegistry, RedirectRule};

/// Register the redirect rules of one page.
///
/// `redirects` is the page's finalized list. `path_versions` holds one
/// candidate target per product version, newest first, with `None` (or an
/// empty path) for versions that do not carry the page.
pub fn configure_redirects<R>(
    registry: &mut R,
    to_path: &str,
    redirects: &[String],
    is_latest: bool,
    path_versions: &[Option<String>],
) where
    R: RedirectRegistry + ?Sized,
{
    let newest_carrying = path_versions
        .iter()
        .flatten()
        .find(|p| !p.is_empty())
        .map(String::as_str);
    let is_newest_carrying = newest_carrying == Some(to_path);

    let target = if is_latest {
        let alias = latest_alias(to_path);
        registry.create_redirect(RedirectRule::temporary(to_path, alias.clone()).forced());
        alias
    } else {
        if is_newest_carrying {
            registry.create_redirect(RedirectRule::temporary(latest_alias(to_path), to_path));
        }
        to_path.to_owned()
    };

    let declared = redirects.iter().filter(|r| !r.is_empty());

    for from in declared.clone().filter(|&from| *from != target) {
        let is_permanent = !is_latest_path(from) && !is_latest_path(&target);
        registry.create_redirect(
            RedirectRule::temporary(from.as_str(), target.as_str()).permanent(is_permanent),
        );
    }

    if is_latest || is_newest_carrying {
        for from in declared {
            let alias = latest_alias(from);
            if alias != target {
                registry.create_redirect(RedirectRule::temporary(alias, target.as_str()));
            }
        }
    }
}
