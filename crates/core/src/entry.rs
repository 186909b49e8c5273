//! Entry-point discovery.
//!
//! Finds the files a graph build should start from: manifest fields
//! first (`package.json`, `pyproject.toml`), then conventional file
//! names. Whole-tree collection is available for `--all` style runs.

use crate::config::{ConfigError, GraphConfig, IgnoreFilter};
use crate::models::{Language, JS_RESOLVE_EXTENSIONS};
use crate::resolver::{normalize_path, relative_key, resolve_local};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid package.json at {path}: {source}")]
    PackageJsonError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid pyproject.toml at {path}: {source}")]
    PyprojectError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// package.json fields that name an entry module, in priority order
const PACKAGE_JSON_FIELDS: &[&str] = &["main", "module", "source"];

const JS_CONVENTIONAL_STEMS: &[&str] = &["index", "main", "src/index", "src/main"];

const PYTHON_CONVENTIONAL_FILES: &[&str] =
    &["main.py", "__main__.py", "app.py", "manage.py", "src/main.py"];

/// Discover entry files for the project at `root`.
///
/// Returns root-relative paths of existing files, deduplicated, in
/// discovery order. An empty result means no entry point was found.
pub fn discover_entries(root: &Path) -> Result<Vec<String>, DiscoveryError> {
    let mut entries = Vec::new();

    entries.extend(package_json_entries(root)?);
    entries.extend(pyproject_entries(root)?);
    entries.extend(conventional_entries(root));

    let mut seen = std::collections::HashSet::new();
    entries.retain(|entry| seen.insert(entry.clone()));

    log::debug!("discovered {} entry point(s)", entries.len());
    Ok(entries)
}

/// Every source file under the root that the ignore filter keeps
pub fn collect_source_files(config: &GraphConfig) -> Result<Vec<String>, DiscoveryError> {
    let filter = IgnoreFilter::new(config)?;
    let mut files = Vec::new();

    let walker = WalkDir::new(&config.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() > 0 && e.file_type().is_dir() {
                return !filter.should_ignore(e.path(), true);
            }
            true
        });

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if filter.should_ignore(path, false) || !filter.is_source_file(path) {
            continue;
        }
        files.push(relative_key(&config.root, path));
    }

    Ok(files)
}

fn package_json_entries(root: &Path) -> Result<Vec<String>, DiscoveryError> {
    let path = root.join("package.json");
    if !path.is_file() {
        return Ok(vec![]);
    }

    let raw = fs::read_to_string(&path).map_err(|source| DiscoveryError::ReadError {
        path: path.clone(),
        source,
    })?;
    let manifest: Value =
        serde_json::from_str(&raw).map_err(|source| DiscoveryError::PackageJsonError {
            path: path.clone(),
            source,
        })?;

    let mut candidates: Vec<&str> = Vec::new();
    for field in PACKAGE_JSON_FIELDS {
        if let Some(value) = manifest.get(*field).and_then(Value::as_str) {
            candidates.push(value);
        }
    }

    match manifest.get("bin") {
        Some(Value::String(bin)) => candidates.push(bin),
        Some(Value::Object(bins)) => candidates.extend(bins.values().filter_map(Value::as_str)),
        _ => {}
    }

    match manifest.get("exports") {
        Some(Value::String(export)) => candidates.push(export),
        Some(Value::Object(exports)) => {
            if let Some(dot) = exports.get(".").and_then(Value::as_str) {
                candidates.push(dot);
            }
        }
        _ => {}
    }

    Ok(candidates
        .into_iter()
        .filter_map(|candidate| resolve_manifest_path(root, candidate))
        .collect())
}

/// Resolve a manifest path like `lib/index` or `./dist/cli.js`
fn resolve_manifest_path(root: &Path, value: &str) -> Option<String> {
    let specifier = if value.starts_with("./") || value.starts_with("../") {
        value.to_string()
    } else {
        format!("./{value}")
    };
    // Resolution is relative to the directory of the manifest
    resolve_local(&specifier, "package.json", root, Language::JavaScript)
        .filter(|resolved| Language::from_path(Path::new(resolved)).is_some())
}

fn pyproject_entries(root: &Path) -> Result<Vec<String>, DiscoveryError> {
    let path = root.join("pyproject.toml");
    if !path.is_file() {
        return Ok(vec![]);
    }

    let raw = fs::read_to_string(&path).map_err(|source| DiscoveryError::ReadError {
        path: path.clone(),
        source,
    })?;
    let manifest: toml::Table =
        toml::from_str(&raw).map_err(|source| DiscoveryError::PyprojectError {
            path: path.clone(),
            source,
        })?;

    let Some(scripts) = manifest
        .get("project")
        .and_then(|project| project.get("scripts"))
        .and_then(|scripts| scripts.as_table())
    else {
        return Ok(vec![]);
    };

    Ok(scripts
        .values()
        .filter_map(|target| target.as_str())
        .filter_map(|target| resolve_script_target(root, target))
        .collect())
}

/// `pkg.cli:main` -> `pkg/cli.py`, `src/pkg/cli.py` or `pkg/cli/__init__.py`
fn resolve_script_target(root: &Path, target: &str) -> Option<String> {
    let module = target.split(':').next()?.trim();
    if module.is_empty() {
        return None;
    }
    let module_path = module.replace('.', "/");

    for base in ["", "src/"] {
        let file = format!("{base}{module_path}.py");
        if root.join(&file).is_file() {
            return Some(relative_key(root, &normalize_path(Path::new(&file))));
        }
        let package = format!("{base}{module_path}/__init__.py");
        if root.join(&package).is_file() {
            return Some(relative_key(root, &normalize_path(Path::new(&package))));
        }
    }

    None
}

fn conventional_entries(root: &Path) -> Vec<String> {
    let mut found = Vec::new();

    for stem in JS_CONVENTIONAL_STEMS {
        if let Some(file) = JS_RESOLVE_EXTENSIONS
            .iter()
            .map(|ext| format!("{stem}.{ext}"))
            .find(|file| root.join(file).is_file())
        {
            found.push(file);
        }
    }

    for file in PYTHON_CONVENTIONAL_FILES {
        if root.join(file).is_file() {
            found.push(file.to_string());
        }
    }

    found
}
