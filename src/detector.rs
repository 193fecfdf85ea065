use crate::config::SearchConfig;
use crate::models::{Ecosystem, ManifestKind};

/// One tracked file name and the extractor it is dispatched to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Tracked {
    name: String,
    kind: ManifestKind,
    ignore_case: bool,
}

/// The file names searched for in one run, in dispatch priority order.
#[derive(Debug, Clone)]
pub struct ManifestTable {
    entries: Vec<Tracked>,
}

impl ManifestTable {
    /// Tracked names for the configured ecosystem, minus any excluded name.
    ///
    /// Naive names come last so they never shadow a structured format.
    pub fn for_config(config: &SearchConfig) -> Self {
        let mut entries = Vec::new();

        match config.ecosystem {
            Ecosystem::Python => {
                entries.push(exact("pyproject.toml", ManifestKind::PyProject));
                entries.push(exact("setup.cfg", ManifestKind::SetupCfg));
                entries.push(exact("setup.py", ManifestKind::SetupPy));
                for name in &config.requirement_files {
                    entries.push(any_case(name, ManifestKind::Requirements));
                }
            }
            Ecosystem::Node => {
                entries.push(exact("package.json", ManifestKind::PackageJson));
                entries.push(any_case("package-lock.json", ManifestKind::PackageLock));
                entries.push(any_case("npm-shrinkwrap.json", ManifestKind::PackageLock));
            }
        }

        for name in &config.naive_files {
            entries.push(exact(name, ManifestKind::Naive));
        }

        entries.retain(|t| {
            !config.excludes.iter().any(|e| {
                if t.ignore_case {
                    e.eq_ignore_ascii_case(&t.name)
                } else {
                    *e == t.name
                }
            })
        });

        ManifestTable { entries }
    }

    /// The extractor for a file name, if it is tracked.
    pub fn classify(&self, file_name: &str) -> Option<ManifestKind> {
        self.entries
            .iter()
            .find(|t| {
                if t.ignore_case {
                    t.name.eq_ignore_ascii_case(file_name)
                } else {
                    t.name == file_name
                }
            })
            .map(|t| t.kind)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn exact(name: &str, kind: ManifestKind) -> Tracked {
    Tracked {
        name: name.to_string(),
        kind,
        ignore_case: false,
    }
}

fn any_case(name: &str, kind: ManifestKind) -> Tracked {
    Tracked {
        name: name.to_string(),
        kind,
        ignore_case: true,
    }
}
