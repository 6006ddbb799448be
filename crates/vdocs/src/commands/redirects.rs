//! `vdocs redirects` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use vdocs_config::{CliSettings, OutputFormat};
use vdocs_content::VersionIndex;
use vdocs_redirects::{RedirectTable, plan_redirects};

use super::{SourceArgs, load_corpus};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the redirects command.
#[derive(Args)]
pub(crate) struct RedirectsArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output file (overrides config; default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: netlify or json (overrides config).
    #[arg(short, long)]
    format: Option<OutputFormat>,
}

impl RedirectsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.source.load_config(CliSettings {
            output: self.output,
            format: self.format,
            ..CliSettings::default()
        })?;
        let nodes = load_corpus(&config)?;
        let versions = VersionIndex::build(&nodes);

        let plan = plan_redirects(&nodes, &versions)?;
        for collision in &plan.collisions {
            output.warning(&format!("Warning: {collision}"));
        }

        let rendered = render(&plan.table, config.redirects_resolved.format)?;
        match &config.redirects_resolved.output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, rendered)?;
                output.success(&format!(
                    "Wrote {} redirects to {}",
                    plan.table.len(),
                    path.display()
                ));
            }
            None => output.data(&rendered)?,
        }

        Ok(())
    }
}

/// Render the redirect table in the requested format.
fn render(table: &RedirectTable, format: OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Netlify => table.to_netlify(),
        OutputFormat::Json => serde_json::to_string_pretty(table)?,
    })
}
