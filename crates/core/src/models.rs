use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classification of an import specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// Relative or rooted path inside the project (./foo, ../bar, /baz, .pkg)
    Local,
    /// Package from npm/pypi
    External,
    /// Standard library / runtime builtin
    Builtin,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Local => "local",
            ImportKind::External => "external",
            ImportKind::Builtin => "builtin",
        }
    }
}

/// Language of the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
}

/// Extensions tried, in order, when resolving a local JS/TS specifier
pub const JS_RESOLVE_EXTENSIONS: &[&str] = &[
    "js", "mjs", "cjs", "jsx", "ts", "tsx", "mts", "cts",
];

/// Extensions tried when resolving a local Python specifier
pub const PYTHON_RESOLVE_EXTENSIONS: &[&str] = &["py"];

impl Language {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" | "pyi" => Some(Language::Python),
            "js" | "mjs" | "cjs" | "jsx" => Some(Language::JavaScript),
            "ts" | "mts" | "cts" | "tsx" => Some(Language::TypeScript),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| Self::from_extension(&ext.to_string_lossy()))
    }

    /// Extensions appended to a local target, in resolution order
    pub fn resolve_extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Python => PYTHON_RESOLVE_EXTENSIONS,
            Language::JavaScript | Language::TypeScript => JS_RESOLVE_EXTENSIONS,
        }
    }

    /// File stem of a directory's index module
    pub fn index_stem(&self) -> &'static str {
        match self {
            Language::Python => "__init__",
            Language::JavaScript | Language::TypeScript => "index",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
        }
    }
}

/// A scanned source file (graph node)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path relative to the project root, `/`-separated
    pub path: String,
    /// Detected language
    pub language: Language,
    /// Number of distinct specifiers extracted from the file
    #[serde(rename = "depCount")]
    pub dep_count: usize,
}

/// A directed dependency from a scanned file to a file or package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    /// Resolved relative path, or an `external:`/`builtin:` label
    pub to: String,
    /// Specifier exactly as written in the source
    pub specifier: String,
    #[serde(rename = "type")]
    pub kind: ImportKind,
}

/// A local-looking specifier that did not map to any file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedImport {
    pub from: String,
    pub specifier: String,
}

/// Result of one graph build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// Files in the order they were scanned
    pub nodes: Vec<SourceFile>,
    /// Edges in discovery order
    pub edges: Vec<DependencyEdge>,
    /// Sorted, deduplicated external package specifiers
    pub externals: Vec<String>,
    /// Sorted, deduplicated builtin module specifiers
    pub builtins: Vec<String>,
    pub unresolved: Vec<UnresolvedImport>,
}

impl DependencyGraph {
    pub fn node(&self, path: &str) -> Option<&SourceFile> {
        self.nodes.iter().find(|n| n.path == path)
    }

    pub fn contains_node(&self, path: &str) -> bool {
        self.node(path).is_some()
    }

    /// Local edges leaving `path`, in discovery order
    pub fn local_edges_from<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = &'a DependencyEdge> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.kind == ImportKind::Local && e.from == path)
    }

    pub fn local_edge_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|e| e.kind == ImportKind::Local)
            .count()
    }
}

/// Label used as the edge target for a non-local specifier
pub fn package_label(kind: ImportKind, specifier: &str) -> String {
    format!("{}:{}", kind.as_str(), specifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_extension() {
        assert_eq!(Language::from_extension("py"), Some(Language::Python));
        assert_eq!(Language::from_extension("MJS"), Some(Language::JavaScript));
        assert_eq!(Language::from_extension("tsx"), Some(Language::TypeScript));
        assert_eq!(Language::from_extension("rs"), None);
    }

    #[test]
    fn test_graph_json_field_names() {
        let graph = DependencyGraph {
            nodes: vec![SourceFile {
                path: "src/a.js".to_string(),
                language: Language::JavaScript,
                dep_count: 2,
            }],
            edges: vec![DependencyEdge {
                from: "src/a.js".to_string(),
                to: "builtin:fs".to_string(),
                specifier: "fs".to_string(),
                kind: ImportKind::Builtin,
            }],
            externals: vec![],
            builtins: vec!["fs".to_string()],
            unresolved: vec![UnresolvedImport {
                from: "src/a.js".to_string(),
                specifier: "./missing".to_string(),
            }],
        };

        let value = serde_json::to_value(&graph).unwrap();
        assert_eq!(value["nodes"][0]["depCount"], 2);
        assert_eq!(value["nodes"][0]["language"], "javascript");
        assert_eq!(value["edges"][0]["type"], "builtin");
        assert_eq!(value["edges"][0]["to"], "builtin:fs");
        assert_eq!(value["unresolved"][0]["specifier"], "./missing");
    }
}
