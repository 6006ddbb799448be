//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Strings without `${` are returned unchanged, so bare `$VAR` is left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that is not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_with_value() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("VDOCS_TEST_SOURCE", "/srv/docs");
        }
        let result = expand_env("${VDOCS_TEST_SOURCE}/content", "docs.source_dir").unwrap();
        assert_eq!(result, "/srv/docs/content");
        unsafe {
            std::env::remove_var("VDOCS_TEST_SOURCE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("VDOCS_TEST_UNSET_OUTPUT");
        }
        let result =
            expand_env("${VDOCS_TEST_UNSET_OUTPUT:-public/_redirects}", "redirects.output").unwrap();
        assert_eq!(result, "public/_redirects");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("VDOCS_TEST_MISSING");
        }
        let err = expand_env("${VDOCS_TEST_MISSING}", "docs.source_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("VDOCS_TEST_MISSING"));
        assert!(err.to_string().contains("docs.source_dir"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("content", "docs.source_dir").unwrap(), "content");
        assert_eq!(expand_env("$HOME/docs", "docs.source_dir").unwrap(), "$HOME/docs");
    }
}
