//! `vdocs frontmatter` command implementation.

use clap::Args;
use vdocs_config::CliSettings;

use super::{SourceArgs, build_site, load_corpus};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the frontmatter command.
#[derive(Args)]
pub(crate) struct FrontmatterArgs {
    /// URL path of the page (e.g. /epas/15/installing/).
    path: String,

    #[command(flatten)]
    source: SourceArgs,
}

impl FrontmatterArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.source.load_config(CliSettings::default())?;
        let site = build_site(&config, &load_corpus(&config)?);

        let resolved = site
            .frontmatter(&self.path)
            .ok_or_else(|| CliError::PageNotFound(self.path.clone()))?;

        Output::new().data(&serde_json::to_string_pretty(&resolved)?)?;
        Ok(())
    }
}
