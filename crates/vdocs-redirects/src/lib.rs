//! Redirect planning for versioned documentation.
//!
//! Every page may declare the paths it used to live at. This crate turns those
//! declarations into a complete, collision-checked set of redirect rules,
//! including the `/<product>/latest/...` aliases of each product's newest
//! version.
//!
//! The passes, in order:
//! - [`preprocess_redirects`]: resolve, pin and deduplicate declared
//!   redirects across the whole corpus, reporting collisions
//! - [`configure_redirects`]: emit the rules of one page
//! - [`configure_legacy_redirects`]: emit rules for pre-versioning URLs
//!
//! [`plan_redirects`] runs all of them over a corpus and collects the rules in
//! a [`RedirectTable`].
//!
//! # Example
//!
//! ```
//! use vdocs_content::{ContentNode, VersionIndex};
//! use vdocs_redirects::plan_redirects;
//!
//! let nodes = vec![
//!     ContentNode::doc("pem", "8", "release-notes").with_redirects(["/pem/latest/notes"]),
//!     ContentNode::doc("pem", "9", "overview"),
//! ];
//! let versions = VersionIndex::build(&nodes);
//!
//! let plan = plan_redirects(&nodes, &versions).unwrap();
//! let rule = plan.table.get("/pem/8/notes/").unwrap();
//! assert_eq!(rule.to_path, "/pem/8/release-notes/");
//! ```

mod configure;
mod legacy;
mod plan;
mod preprocess;
mod rule;

pub use configure::configure_redirects;
pub use legacy::{configure_legacy_redirects, legacy_path_to_latest};
pub use plan::{PathVersions, RedirectPlan, plan_redirects};
pub use preprocess::{
    PathKind, PreprocessOutcome, RedirectCollision, RedirectError, ValidPathSet,
    preprocess_redirects,
};
pub use rule::{RedirectRegistry, RedirectRule, RedirectTable};
