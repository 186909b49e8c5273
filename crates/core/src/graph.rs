//! Breadth-first dependency graph construction.

use crate::categorizer::ImportCategorizer;
use crate::config::BuildOptions;
use crate::models::{
    package_label, DependencyEdge, DependencyGraph, ImportKind, Language, SourceFile,
    UnresolvedImport,
};
use crate::parsers::{Scanner, SpecifierScanner};
use crate::resolver::{normalize_path, relative_key, resolve_local};
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Failed to read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
}

/// A pending file and the number of hops from its entry
#[derive(Debug)]
struct QueueItem {
    path: String,
    depth: usize,
}

/// Builds a [`DependencyGraph`] from a set of entry files.
///
/// Each build owns all of its state; a builder can be reused and shared
/// across threads freely.
pub struct GraphBuilder {
    options: BuildOptions,
    root: PathBuf,
    categorizer: ImportCategorizer,
}

impl GraphBuilder {
    pub fn new(options: BuildOptions) -> Self {
        let root = absolute_root(&options.root);
        Self {
            options,
            root,
            categorizer: ImportCategorizer::new(),
        }
    }

    /// Traverse from `entries` (absolute or root-relative paths).
    ///
    /// Missing files and unrecognized extensions are skipped; any other
    /// filesystem failure on a file is returned as an error.
    pub fn build<P: AsRef<Path>>(&self, entries: &[P]) -> Result<DependencyGraph, GraphError> {
        let mut queue: VecDeque<QueueItem> = entries
            .iter()
            .map(|entry| QueueItem {
                path: self.entry_key(entry.as_ref()),
                depth: 0,
            })
            .collect();

        let mut visited: HashSet<String> = HashSet::new();
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut externals = BTreeSet::new();
        let mut builtins = BTreeSet::new();
        let mut unresolved = Vec::new();

        while let Some(item) = queue.pop_front() {
            if visited.contains(&item.path) {
                continue;
            }

            let absolute = self.root.join(&item.path);
            let Some(language) = Language::from_path(&absolute) else {
                log::debug!("skipping {}: unrecognized extension", item.path);
                continue;
            };
            match fs::metadata(&absolute) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => {
                    log::debug!("skipping {}: not a file", item.path);
                    continue;
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    log::debug!("skipping {}: not found", item.path);
                    continue;
                }
                Err(source) => {
                    return Err(GraphError::ReadError {
                        path: absolute,
                        source,
                    })
                }
            }

            visited.insert(item.path.clone());

            let source = read_source(&absolute)?;
            let specifiers = Scanner::for_language(language).scan(&source);
            log::debug!(
                "scanned {} ({}, depth {}): {} specifiers",
                item.path,
                language.as_str(),
                item.depth,
                specifiers.len()
            );

            nodes.push(SourceFile {
                path: item.path.clone(),
                language,
                dep_count: specifiers.len(),
            });

            let expand = self
                .options
                .max_depth
                .map_or(true, |max_depth| item.depth < max_depth);

            for specifier in specifiers {
                let kind = self.categorizer.categorize(&specifier, language);
                log::trace!("{}: {} -> {}", item.path, specifier, kind.as_str());

                match kind {
                    ImportKind::Local => {
                        match resolve_local(&specifier, &item.path, &self.root, language) {
                            Some(target) => {
                                if expand && !visited.contains(&target) {
                                    queue.push_back(QueueItem {
                                        path: target.clone(),
                                        depth: item.depth + 1,
                                    });
                                }
                                edges.push(DependencyEdge {
                                    from: item.path.clone(),
                                    to: target,
                                    specifier,
                                    kind,
                                });
                            }
                            None => {
                                log::debug!("unresolved import {} in {}", specifier, item.path);
                                unresolved.push(UnresolvedImport {
                                    from: item.path.clone(),
                                    specifier,
                                });
                            }
                        }
                    }
                    ImportKind::External | ImportKind::Builtin => {
                        let (summary, include_edge) = if kind == ImportKind::External {
                            (&mut externals, self.options.include_external_edges)
                        } else {
                            (&mut builtins, self.options.include_builtin_edges)
                        };
                        summary.insert(specifier.clone());
                        if include_edge {
                            edges.push(DependencyEdge {
                                from: item.path.clone(),
                                to: package_label(kind, &specifier),
                                specifier,
                                kind,
                            });
                        }
                    }
                }
            }
        }

        log::info!(
            "built dependency graph: {} nodes, {} edges, {} unresolved",
            nodes.len(),
            edges.len(),
            unresolved.len()
        );

        Ok(DependencyGraph {
            nodes,
            edges,
            externals: externals.into_iter().collect(),
            builtins: builtins.into_iter().collect(),
            unresolved,
        })
    }

    /// Node key of an entry path
    ///
    /// Keys match the ones resolution produces: root-relative inside the
    /// root, absolute outside it.
    fn entry_key(&self, entry: &Path) -> String {
        let normalized = normalize_path(&self.root.join(entry));
        if normalized.starts_with(&self.root) || !entry.is_absolute() {
            return relative_key(&self.root, &normalized);
        }
        // The root may have been canonicalized (symlinked temp dirs)
        match entry.canonicalize() {
            Ok(canonical) => relative_key(&self.root, &canonical),
            Err(_) => relative_key(&self.root, &normalized),
        }
    }
}

/// Build a dependency graph with the given options
pub fn build_graph<P: AsRef<Path>>(
    entries: &[P],
    options: BuildOptions,
) -> Result<DependencyGraph, GraphError> {
    GraphBuilder::new(options).build(entries)
}

fn absolute_root(root: &Path) -> PathBuf {
    if let Ok(canonical) = root.canonicalize() {
        return canonical;
    }
    if root.is_absolute() {
        return normalize_path(root);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize_path(&cwd.join(root)),
        Err(_) => root.to_path_buf(),
    }
}

/// Read a source file as text, replacing invalid UTF-8
fn read_source(path: &Path) -> Result<String, GraphError> {
    let bytes = fs::read(path).map_err(|source| GraphError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
