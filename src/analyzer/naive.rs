use std::collections::BTreeSet;
use std::path::Path;

use super::read_text_lossy;
use crate::diagnostics::Diagnostics;

/// Requested names that occur anywhere in the file's text.
///
/// No structure is assumed, so `react` also matches `react-dom`.
pub fn naive_matches(
    path: &Path,
    requested: &BTreeSet<String>,
    diag: &Diagnostics,
) -> BTreeSet<String> {
    let content = match read_text_lossy(path) {
        Ok(c) => c,
        Err(err) => {
            diag.error(format!("failed to read {}: {}", path.display(), err));
            return BTreeSet::new();
        }
    };

    requested
        .iter()
        .filter(|name| content.contains(name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substring_matches() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"react-dom@^18.2.0:\n  version \"18.2.0\"\n\xff\n").unwrap();
        let requested: BTreeSet<String> = ["react", "vue", "18.2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let diag = Diagnostics::capturing();

        let found = naive_matches(f.path(), &requested, &diag);

        assert!(found.contains("react"));
        assert!(found.contains("18.2"));
        assert!(!found.contains("vue"));
    }
}
