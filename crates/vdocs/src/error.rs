//! CLI error types.

use vdocs_config::ConfigError;
use vdocs_content::LoadError;
use vdocs_redirects::RedirectError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Redirect(#[from] RedirectError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("{0}")]
    Validation(String),
}
