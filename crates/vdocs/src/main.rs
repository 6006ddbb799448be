//! vdocs CLI - Versioned documentation tooling.
//!
//! Provides commands for:
//! - `redirects`: Plan and write the redirect table
//! - `versions`: Print the version index
//! - `nav`: Print the navigation tree and prev/next links of a page
//! - `frontmatter`: Print the effective frontmatter of a page
//! - `check`: Report redirect collisions and missing index pages

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, FrontmatterArgs, NavArgs, RedirectsArgs, VersionsArgs};
use output::Output;

/// vdocs - Versioned documentation structure and redirects.
#[derive(Parser)]
#[command(name = "vdocs", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan redirects and write them.
    Redirects(RedirectsArgs),
    /// Print the version index as JSON.
    Versions(VersionsArgs),
    /// Print the navigation tree and prev/next links of a page as JSON.
    Nav(NavArgs),
    /// Print the effective frontmatter of a page as JSON.
    Frontmatter(FrontmatterArgs),
    /// Report redirect collisions and missing index pages.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        default_filter()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Redirects(args) => args.execute(),
        Commands::Versions(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
        Commands::Frontmatter(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `RUST_LOG` if set and valid, otherwise warn.
fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn test_default_filter_is_warn_without_rust_log() {
        // SAFETY: no other test in this crate reads RUST_LOG
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        assert_eq!(default_filter().max_level_hint(), Some(LevelFilter::WARN));
    }
}
