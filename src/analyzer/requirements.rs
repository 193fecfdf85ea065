//! pip requirements files, following `-r other.txt` references into sibling
//! files so that each name is attributed to the file that actually lists it.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use super::{read_text_lossy, specifier};
use crate::config::SearchConfig;
use crate::diagnostics::Diagnostics;
use crate::discovery::Attribution;

static FILE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:-r|--requirement)\s+(\S+\.txt)$").expect("reference pattern is valid")
});

/// Names listed in a requirements file and every file it references,
/// each attributed to the file it appears in.
pub fn requirement_file_deps(path: &Path, config: &SearchConfig, diag: &Diagnostics) -> Attribution {
    let mut chain = Vec::new();
    let mut deps = Attribution::new();
    collect(path, config, diag, &mut chain, &mut deps);
    deps
}

/// `chain` holds the canonical paths of the files currently being read, so a
/// reference back into it is a cycle.
fn collect(
    path: &Path,
    config: &SearchConfig,
    diag: &Diagnostics,
    chain: &mut Vec<PathBuf>,
    deps: &mut Attribution,
) {
    let content = match read_text_lossy(path) {
        Ok(c) => c,
        Err(err) => {
            diag.error(format!("failed to read {}: {}", path.display(), err));
            return;
        }
    };

    chain.push(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()));

    for line in content.lines() {
        let line = line.trim();

        if let Some(name) = specifier::parse_name(line) {
            deps.entry(name.to_string())
                .or_default()
                .push(path.to_path_buf());
            continue;
        }

        let Some(caps) = FILE_REF_RE.captures(line) else {
            continue;
        };
        let referenced = &caps[1];

        if config
            .requirement_files
            .iter()
            .any(|f| f.eq_ignore_ascii_case(referenced))
        {
            diag.info(format!(
                "{} referenced but skipped this time because it's already in the list of file names to search",
                referenced
            ));
        } else if config.excludes.iter().any(|e| e == referenced) {
            diag.info(format!(
                "{} referenced but skipped because it's in the excludes list",
                referenced
            ));
        } else if Path::new(referenced).components().count() > 1 {
            diag.error(format!(
                "unexpected directory separator in requirements file reference \"{}\" in {}",
                referenced,
                path.display()
            ));
        } else {
            let referenced_path = path
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(referenced);
            let canonical = referenced_path
                .canonicalize()
                .unwrap_or_else(|_| referenced_path.clone());

            if chain.contains(&canonical) {
                diag.warn(format!(
                    "circular requirements file reference to {} in {}",
                    referenced,
                    path.display()
                ));
                continue;
            }

            diag.info(format!(
                "{} referenced in {}, searching {}",
                referenced,
                path.display(),
                referenced_path.display()
            ));
            collect(&referenced_path, config, diag, chain, deps);
        }
    }

    chain.pop();
}
