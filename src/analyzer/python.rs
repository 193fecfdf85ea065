use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use configparser::ini::Ini;

use super::scanner::{scan_literal_list, ListScan};
use super::{read_text_lossy, specifier};
use crate::diagnostics::Diagnostics;

/// Dependency names in a `pyproject.toml`.
///
/// Reads `[project].dependencies`, every `[project.optional-dependencies]`
/// group, every `[dependency-groups]` group and `[build-system].requires`.
pub fn pyproject_deps(path: &Path, diag: &Diagnostics) -> BTreeSet<String> {
    match parse_pyproject_toml(path, diag) {
        Ok(deps) => deps,
        Err(err) => {
            diag.error(format!("{:#}", err));
            BTreeSet::new()
        }
    }
}

fn parse_pyproject_toml(path: &Path, diag: &Diagnostics) -> Result<BTreeSet<String>> {
    let content =
        read_text_lossy(path).with_context(|| format!("failed to read {}", path.display()))?;
    let doc: toml::Table =
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;

    let mut deps = BTreeSet::new();

    if let Some(project) = doc.get("project").and_then(|v| v.as_table()) {
        if let Some(list) = project.get("dependencies") {
            deps.extend(toml_list_names(list, "project.dependencies", path, diag));
        }
        if let Some(groups) = project.get("optional-dependencies").and_then(|v| v.as_table()) {
            for (group, list) in groups {
                let location = format!("project.optional-dependencies.{}", group);
                deps.extend(toml_list_names(list, &location, path, diag));
            }
        }
    }

    if let Some(groups) = doc.get("dependency-groups").and_then(|v| v.as_table()) {
        for (group, list) in groups {
            let location = format!("dependency-groups.{}", group);
            deps.extend(toml_list_names(list, &location, path, diag));
        }
    }

    if let Some(requires) = doc
        .get("build-system")
        .and_then(|v| v.as_table())
        .and_then(|t| t.get("requires"))
    {
        deps.extend(toml_list_names(requires, "build-system.requires", path, diag));
    }

    Ok(deps)
}

/// Names from one TOML dependency array. Tables are dependency-group
/// includes and are skipped silently; any other non-string is reported.
fn toml_list_names(
    list: &toml::Value,
    location: &str,
    path: &Path,
    diag: &Diagnostics,
) -> BTreeSet<String> {
    let Some(items) = list.as_array() else {
        diag.warn(format!(
            "expected a list for {} in {}, found {}",
            location,
            path.display(),
            list.type_str()
        ));
        return BTreeSet::new();
    };

    let mut specs = Vec::with_capacity(items.len());
    for item in items {
        match item {
            toml::Value::String(s) => specs.push(s.as_str()),
            toml::Value::Table(_) => {}
            other => diag.warn(format!(
                "unexpected {} in dependency list {} in {}",
                other.type_str(),
                location,
                path.display()
            )),
        }
    }

    spec_names(specs, path, diag)
}

/// Names from a sequence of raw specifiers. Blank entries are skipped and
/// unparseable ones reported.
fn spec_names<'a>(
    specs: impl IntoIterator<Item = &'a str>,
    path: &Path,
    diag: &Diagnostics,
) -> BTreeSet<String> {
    let mut deps = BTreeSet::new();
    for spec in specs {
        if spec.trim().is_empty() {
            continue;
        }
        match specifier::parse_name(spec) {
            Some(name) => {
                deps.insert(name.to_string());
            }
            None => diag.warn(format!(
                "could not parse dependency specifier \"{}\" in {}",
                spec,
                path.display()
            )),
        }
    }
    deps
}

/// Dependency names in `[options] install_requires` of a `setup.cfg`.
pub fn setup_cfg_deps(path: &Path, diag: &Diagnostics) -> BTreeSet<String> {
    match read_install_requires(path) {
        Ok(Some(value)) => spec_names(value.lines(), path, diag),
        Ok(None) => BTreeSet::new(),
        Err(err) => {
            diag.error(format!("{:#}", err));
            BTreeSet::new()
        }
    }
}

fn read_install_requires(path: &Path) -> Result<Option<String>> {
    let content =
        read_text_lossy(path).with_context(|| format!("failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    let mut config = Ini::new();
    config.set_multiline(true);
    config
        .read(content)
        .map_err(|e| anyhow!("failed to parse {}: {}", path.display(), e))?;

    Ok(config.get("options", "install_requires"))
}

/// Dependency names in a literal `install_requires = [...]` of a `setup.py`.
///
/// Only literal lists of literal strings are understood; anything else is
/// reported as a warning and whatever could be read is still returned.
pub fn setup_py_deps(path: &Path, diag: &Diagnostics) -> BTreeSet<String> {
    let content = match read_text_lossy(path) {
        Ok(c) => c,
        Err(err) => {
            diag.error(format!("failed to read {}: {}", path.display(), err));
            return BTreeSet::new();
        }
    };

    match scan_literal_list(content.trim(), "install_requires") {
        ListScan::Absent => BTreeSet::new(),
        ListScan::NotLiteral => {
            diag.warn(format!(
                "unable to parse the dependency list in {}",
                path.display()
            ));
            BTreeSet::new()
        }
        ListScan::Unterminated => {
            diag.warn(format!(
                "unterminated dependency list in {}",
                path.display()
            ));
            BTreeSet::new()
        }
        ListScan::Parsed { names, partial } => {
            if partial {
                diag.warn(format!(
                    "could not fully parse the dependency list in {}",
                    path.display()
                ));
            }
            names
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", content).unwrap();
        f
    }

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pyproject_all_locations() {
        let f = file_with(
            r#"
[build-system]
requires = ["hatchling>=1.18"]
build-backend = "hatchling.build"

[project]
name = "demo"
dependencies = [
    "httpx[http2]>=0.27",
    "rich; python_version >= '3.8'",
]

[project.optional-dependencies]
docs = ["mkdocs"]
cli = ["typer"]

[dependency-groups]
test = ["pytest>=8", { include-group = "lint" }]
lint = ["ruff"]
"#,
        );
        let diag = Diagnostics::capturing();

        assert_eq!(
            pyproject_deps(f.path(), &diag),
            names(&["hatchling", "httpx", "mkdocs", "pytest", "rich", "ruff", "typer"])
        );
        assert!(diag.messages(Severity::Warning).is_empty());
    }

    #[test]
    fn test_pyproject_non_string_entry_is_reported() {
        let f = file_with(
            r#"
[project]
dependencies = ["attrs", 3, ""]
"#,
        );
        let diag = Diagnostics::capturing();

        assert_eq!(pyproject_deps(f.path(), &diag), names(&["attrs"]));
        let warnings = diag.messages(Severity::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("unexpected integer"));
    }

    #[test]
    fn test_pyproject_malformed_is_empty() {
        let f = file_with("[project\ndependencies = [");
        let diag = Diagnostics::capturing();

        assert!(pyproject_deps(f.path(), &diag).is_empty());
        assert_eq!(diag.messages(Severity::Error).len(), 1);
    }

    #[test]
    fn test_pyproject_missing_file_is_empty() {
        let diag = Diagnostics::capturing();
        let path = Path::new("/nonexistent/find-deps/pyproject.toml");

        assert!(pyproject_deps(path, &diag).is_empty());
        let errors = diag.messages(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("/nonexistent/find-deps/pyproject.toml"));
    }

    #[test]
    fn test_setup_cfg_install_requires() {
        let f = file_with(
            "[metadata]\nname = demo\n\n[options]\npackages = find:\ninstall_requires =\n    requests>=2.0\n    click\n\n[options.extras_require]\ndev = pytest\n",
        );
        let diag = Diagnostics::capturing();

        assert_eq!(setup_cfg_deps(f.path(), &diag), names(&["click", "requests"]));
    }

    #[test]
    fn test_setup_cfg_without_options() {
        let f = file_with("[metadata]\nname = demo\n");
        let diag = Diagnostics::capturing();

        assert!(setup_cfg_deps(f.path(), &diag).is_empty());
        assert!(diag.messages(Severity::Error).is_empty());
    }

    #[test]
    fn test_setup_cfg_empty_file() {
        let f = file_with("");
        let diag = Diagnostics::capturing();

        assert!(setup_cfg_deps(f.path(), &diag).is_empty());
        assert!(diag.messages(Severity::Error).is_empty());
    }

    #[test]
    fn test_setup_py_literal_list() {
        let f = file_with(
            "from setuptools import setup\n\nsetup(\n    name='demo',\n    install_requires=['six', \"attrs>=21\"],\n)\n",
        );
        let diag = Diagnostics::capturing();

        assert_eq!(setup_py_deps(f.path(), &diag), names(&["attrs", "six"]));
        assert!(diag.messages(Severity::Warning).is_empty());
    }

    #[test]
    fn test_setup_py_computed_list_warns() {
        let f = file_with("setup(install_requires=read_requirements())\n");
        let diag = Diagnostics::capturing();

        assert!(setup_py_deps(f.path(), &diag).is_empty());
        let warnings = diag.messages(Severity::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("unable to parse the dependency list"));
    }

    #[test]
    fn test_setup_py_partial_list_warns_but_keeps_names() {
        let f = file_with("setup(install_requires=['a', EXTRA, 'b'])\n");
        let diag = Diagnostics::capturing();

        assert_eq!(setup_py_deps(f.path(), &diag), names(&["a", "b"]));
        let warnings = diag.messages(Severity::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("could not fully parse"));
    }
}
