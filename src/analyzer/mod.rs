use std::collections::BTreeSet;
use std::path::Path;

use crate::config::SearchConfig;
use crate::diagnostics::Diagnostics;
use crate::discovery::Attribution;
use crate::models::ManifestKind;

pub mod naive;
pub mod node;
pub mod python;
pub mod requirements;
pub mod scanner;
pub mod specifier;

/// What one manifest contributed.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Names found in the manifest itself.
    Names(BTreeSet<String>),
    /// Names attributed to the manifest and the files it references.
    Attributed(Attribution),
}

impl ManifestKind {
    /// Run the extractor for this kind of manifest. Never fails: problems are
    /// reported through `diag` and shrink the result instead.
    pub fn extract(&self, path: &Path, config: &SearchConfig, diag: &Diagnostics) -> Extraction {
        match self {
            ManifestKind::PyProject => Extraction::Names(python::pyproject_deps(path, diag)),
            ManifestKind::SetupCfg => Extraction::Names(python::setup_cfg_deps(path, diag)),
            ManifestKind::SetupPy => Extraction::Names(python::setup_py_deps(path, diag)),
            ManifestKind::Requirements => {
                Extraction::Attributed(requirements::requirement_file_deps(path, config, diag))
            }
            ManifestKind::PackageJson => Extraction::Names(node::package_json_deps(path, diag)),
            ManifestKind::PackageLock => Extraction::Names(node::package_lock_deps(path, diag)),
            ManifestKind::Naive => {
                Extraction::Names(naive::naive_matches(path, &config.requested, diag))
            }
        }
    }
}

/// Read a file as UTF-8, dropping any bytes that are not valid UTF-8.
pub fn read_text_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    Ok(text)
}
