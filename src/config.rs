use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Cli;
use crate::models::Ecosystem;

/// Folder names that are always excluded.
pub const DEFAULT_EXCLUDES: &[&str] = &["Trash"];

/// pip requirements file names that are always searched.
pub const DEFAULT_REQUIREMENT_FILES: &[&str] = &["requirements.txt", "requirements-dev.txt"];

/// Optional user configuration, deserialized from `config.toml`.
///
/// Every list extends the built-in defaults; the command line extends it in
/// turn.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Additional file or folder names to ignore.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Additional pip requirements file names.
    #[serde(default)]
    pub pip_req: Vec<String>,
    /// Additional file names to search by substring.
    #[serde(default)]
    pub naive: Vec<String>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `~/.config/find-deps/config.toml`
/// 3. Built-in [`Config::default`]
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("find-deps").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Everything one search run needs; fixed before the walk starts.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub root: PathBuf,
    pub ecosystem: Ecosystem,
    pub requested: BTreeSet<String>,
    /// File and folder names to skip.
    pub excludes: Vec<String>,
    /// pip requirements file names, lower-cased.
    pub requirement_files: Vec<String>,
    pub naive_files: Vec<String>,
}

impl SearchConfig {
    /// Combine built-in defaults, the config file and the command line.
    pub fn resolve(cli: &Cli, config: Config) -> Result<Self> {
        let root = match &cli.root {
            Some(root) => root.clone(),
            None => dirs::home_dir()
                .context("could not determine the home directory; pass --root")?,
        };

        let excludes = DEFAULT_EXCLUDES
            .iter()
            .map(|s| s.to_string())
            .chain(config.exclude)
            .chain(cli.exclude.iter().cloned())
            .collect();

        let requirement_files = DEFAULT_REQUIREMENT_FILES
            .iter()
            .map(|s| s.to_string())
            .chain(config.pip_req)
            .chain(cli.pip_req.iter().cloned())
            .map(|s| s.to_lowercase())
            .collect();

        let naive_files = config
            .naive
            .into_iter()
            .chain(cli.naive.iter().cloned())
            .collect();

        Ok(SearchConfig {
            root,
            ecosystem: (&cli.language).into(),
            requested: cli.deps.iter().cloned().collect(),
            excludes,
            requirement_files,
            naive_files,
        })
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excludes.iter().any(|e| e == name)
    }
}
