//! Redirect rules and registries.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::{Serialize, Serializer};

/// A single redirect from one URL path to another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectRule {
    pub from_path: String,
    pub to_path: String,
    /// Permanent (301) rather than temporary (302).
    pub is_permanent: bool,
    /// Also redirect client-side navigation.
    pub redirect_in_browser: bool,
    /// Redirect even when a page exists at `from_path`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force: bool,
}

impl RedirectRule {
    /// Temporary, in-browser redirect.
    #[must_use]
    pub fn temporary(from_path: impl Into<String>, to_path: impl Into<String>) -> Self {
        Self {
            from_path: from_path.into(),
            to_path: to_path.into(),
            is_permanent: false,
            redirect_in_browser: true,
            force: false,
        }
    }

    #[must_use]
    pub fn permanent(mut self, is_permanent: bool) -> Self {
        self.is_permanent = is_permanent;
        self
    }

    #[must_use]
    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }

    #[must_use]
    pub fn server_only(mut self) -> Self {
        self.redirect_in_browser = false;
        self
    }

    /// HTTP status code for the rule.
    #[must_use]
    pub fn status(&self) -> u16 {
        if self.is_permanent { 301 } else { 302 }
    }
}

/// Sink for redirect rules.
///
/// Implementations apply last-write-wins semantics per `from_path`.
pub trait RedirectRegistry {
    fn create_redirect(&mut self, rule: RedirectRule);
}

/// Records every registration, duplicates included.
impl RedirectRegistry for Vec<RedirectRule> {
    fn create_redirect(&mut self, rule: RedirectRule) {
        self.push(rule);
    }
}

/// Ordered redirect table, one rule per source path.
///
/// A later registration for the same `from_path` replaces the earlier rule
/// but keeps its position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedirectTable {
    rules: Vec<RedirectRule>,
    by_from: HashMap<String, usize>,
}

impl RedirectTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules in first-registration order.
    #[must_use]
    pub fn rules(&self) -> &[RedirectRule] {
        &self.rules
    }

    /// Rule registered for `from_path`.
    #[must_use]
    pub fn get(&self, from_path: &str) -> Option<&RedirectRule> {
        self.by_from.get(from_path).map(|&i| &self.rules[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render Netlify `_redirects` lines: `from to status[!]`.
    #[must_use]
    pub fn to_netlify(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            let force = if rule.force { "!" } else { "" };
            let _ = writeln!(out, "{} {} {}{force}", rule.from_path, rule.to_path, rule.status());
        }
        out
    }
}

impl RedirectRegistry for RedirectTable {
    fn create_redirect(&mut self, rule: RedirectRule) {
        if let Some(&index) = self.by_from.get(&rule.from_path) {
            tracing::debug!(from = %rule.from_path, to = %rule.to_path, "Redirect replaced");
            self.rules[index] = rule;
        } else {
            self.by_from.insert(rule.from_path.clone(), self.rules.len());
            self.rules.push(rule);
        }
    }
}

impl Serialize for RedirectTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rules.serialize(serializer)
    }
}
