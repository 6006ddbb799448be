//! CLI command implementations.

mod check;
mod frontmatter;
mod nav;
mod redirects;
mod versions;

use std::path::PathBuf;

use clap::Args;
use vdocs_config::{CliSettings, Config};
use vdocs_content::{ContentNode, ContentSource, FsContentSource};
use vdocs_site::{DocsSite, SiteOptions};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use frontmatter::FrontmatterArgs;
pub(crate) use nav::NavArgs;
pub(crate) use redirects::RedirectsArgs;
pub(crate) use versions::VersionsArgs;

/// Arguments shared by every command that reads the corpus.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover vdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long, env = "VDOCS_SOURCE_DIR")]
    source_dir: Option<PathBuf>,
}

impl SourceArgs {
    /// Load configuration, with `settings` applied on top of these arguments.
    pub(crate) fn load_config(&self, settings: CliSettings) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            ..settings
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            config_path = ?config.config_path,
            source_dir = %config.docs_resolved.source_dir.display(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Load the content corpus configured in `config`.
pub(crate) fn load_corpus(config: &Config) -> Result<Vec<ContentNode>, CliError> {
    let source = FsContentSource::new(config.docs_resolved.source_dir.clone());
    Ok(source.load()?)
}

/// Build the site for `nodes` with the navigation settings of `config`.
pub(crate) fn build_site(config: &Config, nodes: &[ContentNode]) -> DocsSite {
    DocsSite::with_options(
        nodes,
        SiteOptions {
            warn_missing_index: config.navigation.warn_missing_index,
        },
    )
}
