//! `vdocs check` command implementation.

use clap::Args;
use vdocs_config::CliSettings;
use vdocs_redirects::plan_redirects;

use super::{SourceArgs, build_site, load_corpus};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Fail if any warning is reported.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.source.load_config(CliSettings::default())?;
        let nodes = load_corpus(&config)?;
        output.info(&format!(
            "Checking {} pages in {}",
            nodes.len(),
            config.docs_resolved.source_dir.display()
        ));

        let site = build_site(&config, &nodes);
        let plan = plan_redirects(&nodes, site.versions())?;

        let mut warnings: Vec<String> = plan.collisions.iter().map(ToString::to_string).collect();
        warnings.extend(site.missing_indexes().iter().map(ToString::to_string));

        for warning in &warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        if warnings.is_empty() {
            output.success(&format!("No problems found ({} redirects)", plan.table.len()));
            return Ok(());
        }

        if self.strict {
            return Err(CliError::Validation(format!(
                "{} warnings found",
                warnings.len()
            )));
        }
        output.info(&format!("{} warnings found", warnings.len()));
        Ok(())
    }
}
