//! Dependency manifest scanning
//!
//! Reads the well-known manifest files at the repository root and
//! extracts package names into direct/dev/optional lists, merged and
//! deduplicated across manifests. An unreadable or malformed manifest
//! contributes nothing; it never fails the scan.

use crate::models::DependencyReport;
use std::path::Path;
use tracing::debug;

/// Manifest filenames probed at the repository root.
const MANIFEST_FILES: &[&str] = &[
    "requirements.txt",
    "requirements-dev.txt",
    "Pipfile",
    "pyproject.toml",
    "package.json",
    "go.mod",
    "Cargo.toml",
];

/// Scan the repository root for dependency manifests.
pub fn scan_root(root: &Path) -> DependencyReport {
    let mut report = DependencyReport::default();
    for name in MANIFEST_FILES {
        let path = root.join(name);
        let Ok(raw) = std::fs::read_to_string(&path) else {
            continue;
        };
        let parsed = match *name {
            "requirements.txt" | "requirements-dev.txt" => parse_requirements(&raw),
            "Pipfile" => parse_pipfile(&raw),
            "pyproject.toml" => parse_pyproject(&raw),
            "package.json" => parse_package_json(&raw),
            "go.mod" => parse_go_mod(&raw),
            "Cargo.toml" => parse_cargo_toml(&raw),
            _ => DependencyReport::default(),
        };
        debug!("parsed {} dependencies from {}", parsed.total(), name);
        report.merge(parsed);
    }
    report.dedup();
    report
}

/// requirements.txt: one package per line, version specifiers stripped.
fn parse_requirements(raw: &str) -> DependencyReport {
    let mut report = DependencyReport::default();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        let name = line
            .split(|c| matches!(c, '>' | '<' | '=' | '!' | '~' | ';' | '['))
            .next()
            .unwrap_or("")
            .trim();
        if !name.is_empty() {
            report.direct.push(name.to_string());
        }
    }
    report
}

fn table_keys(value: &toml::Value, path: &[&str]) -> Vec<String> {
    let mut current = value;
    for key in path {
        match current.get(key) {
            Some(next) => current = next,
            None => return Vec::new(),
        }
    }
    current
        .as_table()
        .map(|table| table.keys().cloned().collect())
        .unwrap_or_default()
}

/// Pipfile: `[packages]` and `[dev-packages]` tables.
fn parse_pipfile(raw: &str) -> DependencyReport {
    let Ok(value) = raw.parse::<toml::Value>() else {
        return DependencyReport::default();
    };
    DependencyReport {
        direct: table_keys(&value, &["packages"]),
        dev: table_keys(&value, &["dev-packages"]),
        optional: Vec::new(),
    }
}

/// pyproject.toml: poetry dependency tables, skipping the python
/// version requirement itself.
fn parse_pyproject(raw: &str) -> DependencyReport {
    let Ok(value) = raw.parse::<toml::Value>() else {
        return DependencyReport::default();
    };
    let direct = table_keys(&value, &["tool", "poetry", "dependencies"])
        .into_iter()
        .filter(|name| name != "python")
        .collect();
    let dev = table_keys(&value, &["tool", "poetry", "group", "dev", "dependencies"]);
    DependencyReport {
        direct,
        dev,
        optional: Vec::new(),
    }
}

/// package.json: dependencies / devDependencies / optionalDependencies.
fn parse_package_json(raw: &str) -> DependencyReport {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) else {
        return DependencyReport::default();
    };
    let keys = |field: &str| -> Vec<String> {
        value
            .get(field)
            .and_then(|v| v.as_object())
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    };
    DependencyReport {
        direct: keys("dependencies"),
        dev: keys("devDependencies"),
        optional: keys("optionalDependencies"),
    }
}

/// go.mod: single-line requires and require blocks.
fn parse_go_mod(raw: &str) -> DependencyReport {
    let mut report = DependencyReport::default();
    let mut in_block = false;
    for line in raw.lines() {
        let line = line.trim();
        if line.starts_with("require (") {
            in_block = true;
            continue;
        }
        if in_block {
            if line.starts_with(')') {
                in_block = false;
                continue;
            }
            if let Some(module) = line.split_whitespace().next() {
                if !module.is_empty() && !module.starts_with("//") {
                    report.direct.push(module.to_string());
                }
            }
        } else if let Some(rest) = line.strip_prefix("require ") {
            if let Some(module) = rest.split_whitespace().next() {
                report.direct.push(module.to_string());
            }
        }
    }
    report
}

/// Cargo.toml: `[dependencies]` and `[dev-dependencies]`.
fn parse_cargo_toml(raw: &str) -> DependencyReport {
    let Ok(value) = raw.parse::<toml::Value>() else {
        return DependencyReport::default();
    };
    DependencyReport {
        direct: table_keys(&value, &["dependencies"]),
        dev: table_keys(&value, &["dev-dependencies"]),
        optional: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements_strips_specifiers() {
        let report = parse_requirements("requests>=2.28\nflask==2.0\n# comment\n-r other.txt\n\nnumpy\n");
        assert_eq!(report.direct, vec!["requests", "flask", "numpy"]);
    }

    #[test]
    fn test_package_json_sections() {
        let raw = r#"{
            "dependencies": {"react": "^18.0.0"},
            "devDependencies": {"jest": "^29.0.0"},
            "optionalDependencies": {"fsevents": "*"}
        }"#;
        let report = parse_package_json(raw);
        assert_eq!(report.direct, vec!["react"]);
        assert_eq!(report.dev, vec!["jest"]);
        assert_eq!(report.optional, vec!["fsevents"]);
    }

    #[test]
    fn test_malformed_json_contributes_nothing() {
        assert_eq!(parse_package_json("{not json"), DependencyReport::default());
    }

    #[test]
    fn test_pyproject_skips_python_requirement() {
        let raw = "[tool.poetry.dependencies]\npython = \"^3.11\"\nhttpx = \"*\"\n";
        let report = parse_pyproject(raw);
        assert_eq!(report.direct, vec!["httpx"]);
    }

    #[test]
    fn test_go_mod_single_and_block() {
        let raw = "module example.com/app\n\nrequire github.com/pkg/errors v0.9.1\n\nrequire (\n\tgolang.org/x/sync v0.5.0\n\tgithub.com/stretchr/testify v1.8.0 // indirect\n)\n";
        let report = parse_go_mod(raw);
        assert_eq!(
            report.direct,
            vec![
                "github.com/pkg/errors",
                "golang.org/x/sync",
                "github.com/stretchr/testify"
            ]
        );
    }

    #[test]
    fn test_cargo_toml_tables() {
        let raw = "[dependencies]\nserde = \"1\"\nregex = \"1\"\n\n[dev-dependencies]\ntempfile = \"3\"\n";
        let mut report = parse_cargo_toml(raw);
        report.dedup();
        assert_eq!(report.direct, vec!["regex", "serde"]);
        assert_eq!(report.dev, vec!["tempfile"]);
    }

    #[test]
    fn test_scan_root_merges_and_dedups() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("requirements.txt"), "flask\nrequests\n").unwrap();
        std::fs::write(dir.path().join("requirements-dev.txt"), "requests\npytest\n").unwrap();
        let report = scan_root(dir.path());
        assert_eq!(report.direct, vec!["flask", "pytest", "requests"]);
    }

    #[test]
    fn test_scan_root_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(scan_root(dir.path()).total(), 0);
    }
}
