use walkdir::{DirEntry, WalkDir};

use crate::analyzer::Extraction;
use crate::config::SearchConfig;
use crate::detector::ManifestTable;
use crate::diagnostics::Diagnostics;
use crate::discovery::DiscoveryMap;
use crate::models::ManifestKind;

/// Walk `config.root` and collect every requested name found in a tracked
/// manifest.
///
/// Excluded directories are pruned before they are entered, including the
/// root itself. Unreadable entries are skipped.
pub fn crawl(config: &SearchConfig, diag: &Diagnostics) -> DiscoveryMap {
    let table = ManifestTable::for_config(config);
    let mut discoveries = DiscoveryMap::default();

    if table.is_empty() {
        diag.warn("every tracked file name is excluded; nothing to search");
        return discoveries;
    }

    let walker = WalkDir::new(&config.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry, config));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                diag.info(format!("skipping unreadable entry: {}", err));
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }

        let Some(kind) = entry.file_name().to_str().and_then(|n| table.classify(n)) else {
            continue;
        };

        let path = entry.path();
        if kind == ManifestKind::Naive {
            diag.info(format!("Naively searching {}", path.display()));
        } else {
            diag.info(format!("Searching {}", path.display()));
        }

        match kind.extract(path, config, diag) {
            Extraction::Names(names) => discoveries.record(&config.requested, &names, path),
            Extraction::Attributed(fragment) => discoveries.merge(&config.requested, fragment),
        }
    }

    discoveries
}

fn is_excluded_dir(entry: &DirEntry, config: &SearchConfig) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.is_excluded(name))
}
