/// Package ecosystem whose manifests are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ecosystem {
    Python,
    Node,
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ecosystem::Python => write!(f, "Python"),
            Ecosystem::Node => write!(f, "Node"),
        }
    }
}

/// Manifest formats the crawler knows how to read.
///
/// Each tracked filename maps to exactly one kind; the kind decides which
/// extractor runs (see [`ManifestKind::extract`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// `pyproject.toml`
    PyProject,
    /// `setup.cfg`
    SetupCfg,
    /// `setup.py`
    SetupPy,
    /// pip requirements files, possibly chained with `-r`
    Requirements,
    /// `package.json`
    PackageJson,
    /// `package-lock.json` / `npm-shrinkwrap.json`
    PackageLock,
    /// Any other tracked file, searched by substring
    Naive,
}
