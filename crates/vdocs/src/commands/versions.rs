//! `vdocs versions` command implementation.

use clap::Args;
use vdocs_config::CliSettings;
use vdocs_content::VersionIndex;

use super::{SourceArgs, load_corpus};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the versions command.
#[derive(Args)]
pub(crate) struct VersionsArgs {
    #[command(flatten)]
    source: SourceArgs,
}

impl VersionsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.source.load_config(CliSettings::default())?;
        let nodes = load_corpus(&config)?;

        let versions = VersionIndex::build(&nodes);

        Output::new().data(&serde_json::to_string_pretty(&versions)?)?;
        Ok(())
    }
}
