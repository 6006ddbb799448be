//! `vdocs nav` command implementation.

use clap::Args;
use serde::Serialize;
use vdocs_config::CliSettings;
use vdocs_site::{DocsSite, NavNode, PrevNext};

use super::{SourceArgs, build_site, load_corpus};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// URL path of the page (e.g. /epas/15/installing/).
    path: String,

    #[command(flatten)]
    source: SourceArgs,
}

/// Navigation data of one page.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageNavigation {
    navigation: NavNode,
    prev_next: PrevNext,
}

impl NavArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.source.load_config(CliSettings::default())?;
        let site = build_site(&config, &load_corpus(&config)?);

        let page = page_navigation(&site, &self.path)
            .ok_or_else(|| CliError::PageNotFound(self.path.clone()))?;

        Output::new().data(&serde_json::to_string_pretty(&page)?)?;
        Ok(())
    }
}

fn page_navigation(site: &DocsSite, path: &str) -> Option<PageNavigation> {
    Some(PageNavigation {
        navigation: site.navigation(path)?,
        prev_next: site.prev_next(path)?,
    })
}
