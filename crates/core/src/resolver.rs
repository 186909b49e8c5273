//! Local specifier resolution.
//!
//! Maps a local specifier and the file containing it to a file on disk.
//! Only existence and file-type metadata are consulted, never contents.

use crate::models::Language;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Resolve a local specifier written in `from` (root-relative).
///
/// Tries, in order: the exact path, the path with each of the language's
/// extensions appended, then `index.<ext>` (`__init__.py` for Python)
/// inside the path when it is a directory. Returns the root-relative
/// path of the first hit, or `None` when nothing exists.
pub fn resolve_local(
    specifier: &str,
    from: &str,
    root: &Path,
    language: Language,
) -> Option<String> {
    let spec_path = specifier_to_path(specifier, language);
    let directory_only = spec_path.ends_with('/');

    let base_dir = root
        .join(from)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    let target = normalize_path(&base_dir.join(&spec_path));

    if !directory_only {
        if target.is_file() {
            return Some(relative_key(root, &target));
        }

        for ext in language.resolve_extensions() {
            let candidate = append_extension(&target, ext);
            if candidate.is_file() {
                return Some(relative_key(root, &candidate));
            }
        }
    }

    if target.is_dir() {
        for ext in language.resolve_extensions() {
            let candidate = target.join(format!("{}.{}", language.index_stem(), ext));
            if candidate.is_file() {
                return Some(relative_key(root, &candidate));
            }
        }
    }

    log::trace!("no file for {specifier} from {from}");
    None
}

/// Rewrite a specifier into path form.
///
/// Python relative modules use leading dots and dotted names:
/// `.` -> `./`, `..config` -> `../config`, `.a.b` -> `./a/b`.
/// Other languages already use paths.
pub fn specifier_to_path(specifier: &str, language: Language) -> String {
    match language {
        Language::Python => {
            let dots = specifier.chars().take_while(|&c| c == '.').count();
            if dots == 0 {
                return specifier.replace('.', "/");
            }
            let prefix = if dots == 1 {
                "./".to_string()
            } else {
                "../".repeat(dots - 1)
            };
            let rest = specifier[dots..].replace('.', "/");
            format!("{prefix}{rest}")
        }
        Language::JavaScript | Language::TypeScript => specifier.to_string(),
    }
}

/// Collapse `.` and `..` components without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Identity of a file inside a build: its path relative to `root` with
/// `/` separators. Files outside the root keep their full path.
pub fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if relative.has_root() {
        // RootDir renders as "/" already; avoid doubling it when joining
        let rest: Vec<&str> = parts.iter().skip(1).map(String::as_str).collect();
        format!("/{}", rest.join("/"))
    } else {
        parts.join("/")
    }
}

/// `dir/name` + `ts` -> `dir/name.ts` (never replaces an existing extension)
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(".");
    raw.push(ext);
    PathBuf::from(raw)
}
