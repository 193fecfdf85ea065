use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

/// Name → paths fragment produced by extractors that attribute names to more
/// than one file (chained requirement files).
pub type Attribution = IndexMap<String, Vec<PathBuf>>;

/// Every requested dependency found during one search, with the files it was
/// found in.
///
/// Names keep the order in which they were first discovered, and paths keep
/// discovery order. Paths are not deduplicated.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DiscoveryMap {
    entries: IndexMap<String, Vec<PathBuf>>,
}

impl DiscoveryMap {
    /// Attribute every requested name in `found` to `path`.
    pub fn record(&mut self, requested: &BTreeSet<String>, found: &BTreeSet<String>, path: &Path) {
        for name in requested.intersection(found) {
            self.entries
                .entry(name.clone())
                .or_default()
                .push(path.to_path_buf());
        }
    }

    /// Merge a multi-file fragment, keeping only requested names.
    pub fn merge(&mut self, requested: &BTreeSet<String>, fragment: Attribution) {
        for (name, paths) in fragment {
            if requested.contains(&name) {
                self.entries.entry(name).or_default().extend(paths);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&[PathBuf]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<PathBuf>)> {
        self.entries.iter()
    }
}
