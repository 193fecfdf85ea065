use std::path::PathBuf;

use clap::Parser;

use crate::models::Ecosystem;

#[derive(Parser, Debug)]
#[command(
    name = "find-deps",
    about = "Search all JavaScript or Python dependency lists on your device",
    after_help = "For more info, visit https://github.com/wheelercj/find-deps",
    version
)]
pub struct Cli {
    /// Ecosystem whose dependency files are searched
    #[arg(value_name = "LANGUAGE")]
    pub language: EcosystemArg,

    /// Names of the dependencies to look for
    #[arg(required = true, num_args = 1.., value_name = "DEPS")]
    pub deps: Vec<String>,

    /// Directory to search [default: your home directory]
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Config file [default: ~/.config/find-deps/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Name of a file or folder to ignore (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Name of a pip requirements file to search for (repeatable)
    #[arg(long = "pip-req", value_name = "NAME")]
    pub pip_req: Vec<String>,

    /// Name of any other file to search by plain substring match (repeatable)
    #[arg(long, value_name = "NAME")]
    pub naive: Vec<String>,

    /// Output format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Report every file searched and every skipped reference
    #[arg(short, long)]
    pub verbose: bool,

    /// Omit ANSI escape codes
    #[arg(long = "no-ansi")]
    pub no_ansi: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum EcosystemArg {
    Py,
    Js,
}

impl From<&EcosystemArg> for Ecosystem {
    fn from(arg: &EcosystemArg) -> Self {
        match arg {
            EcosystemArg::Py => Ecosystem::Python,
            EcosystemArg::Js => Ecosystem::Node,
        }
    }
}
