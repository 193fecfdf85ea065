//! `find-deps` — find which Python or JavaScript dependency files under a
//! directory tree mention a set of package names.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load the optional config file and resolve the search ([`config`]).
//! 3. Walk the tree, pruning excluded folders ([`crawler`]).
//! 4. Dispatch each tracked manifest to its extractor ([`detector`], [`analyzer`]).
//! 5. Collect requested names per file ([`discovery`]).
//! 6. Render the requested report ([`report`]).

mod analyzer;
mod cli;
mod config;
mod crawler;
mod detector;
mod diagnostics;
mod discovery;
mod models;
mod report;

use anyhow::{bail, Result};
use clap::Parser;

use cli::{Cli, ReportFormat};
use config::{load_config, SearchConfig};
use diagnostics::Diagnostics;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let color = !cli.no_ansi;

    let file_config = load_config(cli.config.as_deref())?;
    let search = SearchConfig::resolve(&cli, file_config)?;

    if !search.root.is_dir() {
        bail!("{} is not a directory", search.root.display());
    }

    let diagnostics = Diagnostics::new(cli.verbose, color);
    diagnostics.info(format!(
        "Searching {} dependency files under {}",
        search.ecosystem,
        search.root.display()
    ));

    let discoveries = crawler::crawl(&search, &diagnostics);

    match cli.report {
        ReportFormat::Terminal => {
            if discoveries.is_empty() {
                eprintln!(
                    "None of the requested dependencies were found under {}",
                    search.root.display()
                );
            }
            report::terminal::render(&discoveries, color);
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&discoveries)?);
        }
    }

    Ok(())
}
