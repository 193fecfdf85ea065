use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use super::read_text_lossy;
use crate::diagnostics::Diagnostics;

/// Dependency names declared in a `package.json`.
pub fn package_json_deps(path: &Path, diag: &Diagnostics) -> BTreeSet<String> {
    match load_json(path) {
        Ok(Some(pkg)) => package_deps(&pkg),
        Ok(None) => BTreeSet::new(),
        Err(err) => {
            diag.error(format!("{:#}", err));
            BTreeSet::new()
        }
    }
}

/// Dependency names in a `package-lock.json` or `npm-shrinkwrap.json`.
///
/// Every descriptor of the `packages` map is read like a `package.json`.
/// Version 1 lock files keep the resolved tree under a top-level
/// `dependencies` object instead, which is walked too.
pub fn package_lock_deps(path: &Path, diag: &Diagnostics) -> BTreeSet<String> {
    let lock = match load_json(path) {
        Ok(Some(lock)) => lock,
        Ok(None) => return BTreeSet::new(),
        Err(err) => {
            diag.error(format!("{:#}", err));
            return BTreeSet::new();
        }
    };

    let mut deps = nested_deps(&lock);
    if let Some(packages) = lock.get("packages").and_then(|v| v.as_object()) {
        for pkg in packages.values() {
            deps.extend(package_deps(pkg));
        }
    }
    deps
}

/// Parse a JSON file; `None` when it is empty.
fn load_json(path: &Path) -> Result<Option<Value>> {
    let content =
        read_text_lossy(path).with_context(|| format!("failed to read {}", path.display()))?;
    let content = content.trim();
    if content.is_empty() {
        return Ok(None);
    }
    let json: Value = serde_json::from_str(content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(json))
}

/// All dependency names of one package descriptor.
pub fn package_deps(pkg: &Value) -> BTreeSet<String> {
    let mut deps = nested_deps(pkg);

    for section in ["devDependencies", "peerDependencies", "optionalDependencies"] {
        if let Some(map) = pkg.get(section).and_then(|v| v.as_object()) {
            deps.extend(map.keys().cloned());
        }
    }

    for section in ["bundleDependencies", "bundledDependencies"] {
        if let Some(list) = pkg.get(section).and_then(|v| v.as_array()) {
            deps.extend(list.iter().filter_map(|v| v.as_str()).map(str::to_string));
        }
    }

    if let Some(overrides) = pkg.get("overrides").and_then(|v| v.as_object()) {
        deps.extend(override_names(overrides));
    }

    deps
}

/// Keys of `pkg.dependencies`, descending into each dependency's own
/// `dependencies` object.
pub fn nested_deps(pkg: &Value) -> BTreeSet<String> {
    let mut deps = BTreeSet::new();
    if let Some(map) = pkg.get("dependencies").and_then(|v| v.as_object()) {
        for (name, dep) in map {
            deps.insert(name.clone());
            deps.extend(nested_deps(dep));
        }
    }
    deps
}

/// Keys of an `overrides` object, flattened through nested override objects.
pub fn override_names(overrides: &serde_json::Map<String, Value>) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for (name, value) in overrides {
        names.insert(name.clone());
        if let Some(nested) = value.as_object() {
            names.extend(override_names(nested));
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_nested_tree_dev_and_overrides() {
        let pkg = json!({
            "dependencies": { "a": { "dependencies": { "b": {} } } },
            "devDependencies": { "c": "*" },
            "overrides": { "d": { "e": "*" } }
        });
        assert_eq!(package_deps(&pkg), names(&["a", "b", "c", "d", "e"]));
    }

    #[test]
    fn test_all_sections() {
        let pkg = json!({
            "name": "my-app",
            "dependencies": { "express": "^4.18.2" },
            "peerDependencies": { "react": ">=18" },
            "optionalDependencies": { "fsevents": "^2" },
            "bundleDependencies": ["left-pad"],
            "bundledDependencies": ["right-pad"],
            "overrides": { "foo": "1.0.0", "bar": { ".": "2.0.0", "baz": "3.0.0" } }
        });
        assert_eq!(
            package_deps(&pkg),
            names(&[
                ".", "bar", "baz", "express", "foo", "fsevents", "left-pad", "react", "right-pad"
            ])
        );
    }

    #[test]
    fn test_boolean_bundle_dependencies_ignored() {
        let pkg = json!({ "bundleDependencies": true, "dependencies": { "x": "1" } });
        assert_eq!(package_deps(&pkg), names(&["x"]));
    }

    #[test]
    fn test_package_json_file() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{
  "name": "my-app",
  "dependencies": {{ "express": "^4.18.2", "lodash": "^4.17.21" }},
  "devDependencies": {{ "jest": "^29.0.0" }}
}}"#
        )
        .unwrap();
        let diag = Diagnostics::capturing();

        assert_eq!(
            package_json_deps(f.path(), &diag),
            names(&["express", "jest", "lodash"])
        );
    }

    #[test]
    fn test_malformed_and_empty_files() {
        let mut bad = NamedTempFile::new().unwrap();
        write!(bad, "{{ \"dependencies\": ").unwrap();
        let empty = NamedTempFile::new().unwrap();
        let diag = Diagnostics::capturing();

        assert!(package_json_deps(bad.path(), &diag).is_empty());
        assert!(package_json_deps(empty.path(), &diag).is_empty());
        assert!(package_lock_deps(Path::new("/nonexistent/package-lock.json"), &diag).is_empty());
        assert_eq!(diag.messages(Severity::Error).len(), 2);
    }

    #[test]
    fn test_package_lock_packages_map() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{
  "name": "my-app",
  "lockfileVersion": 3,
  "packages": {{
    "": {{ "name": "my-app", "dependencies": {{ "express": "^4.18.2" }}, "devDependencies": {{ "jest": "^29" }} }},
    "node_modules/express": {{ "version": "4.18.2", "dependencies": {{ "body-parser": "1.20.1" }} }},
    "node_modules/body-parser": {{ "version": "1.20.1" }}
  }}
}}"#
        )
        .unwrap();
        let diag = Diagnostics::capturing();

        assert_eq!(
            package_lock_deps(f.path(), &diag),
            names(&["body-parser", "express", "jest"])
        );
    }

    #[test]
    fn test_package_lock_v1_tree() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{
  "lockfileVersion": 1,
  "dependencies": {{
    "debug": {{ "version": "2.6.9", "requires": {{ "ms": "2.0.0" }},
               "dependencies": {{ "ms": {{ "version": "2.0.0" }} }} }}
  }}
}}"#
        )
        .unwrap();
        let diag = Diagnostics::capturing();

        assert_eq!(package_lock_deps(f.path(), &diag), names(&["debug", "ms"]));
    }
}
