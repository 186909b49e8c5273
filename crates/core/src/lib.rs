//! MTA Rust DepGraph Core Library
//!
//! This library builds the module dependency graph of Python and
//! Node.js/TypeScript projects by lexically scanning source files for
//! import statements and following local imports breadth-first.
//!
//! # Features
//!
//! - Scan Python imports (`import a, b`, `from .x import y`)
//! - Scan JavaScript/TypeScript imports (ESM, re-exports, dynamic import, require)
//! - Ignore import-like text inside comments and string literals
//! - Classify specifiers as local, builtin, or external
//! - Resolve local specifiers with extension and index-file fallback
//! - Depth-limited, cycle-safe traversal with unresolved-import tracking
//! - Render results as a tree, Graphviz DOT, JSON, or YAML
//!
//! # Example
//!
//! ```no_run
//! use mta_rust_depgraph_core::{build_graph, format_output, BuildOptions, OutputFormat};
//! use std::path::PathBuf;
//!
//! let options = BuildOptions::new(PathBuf::from(".")).with_max_depth(Some(3));
//! let graph = build_graph(&["src/index.ts"], options).unwrap();
//!
//! let json = format_output(&graph, OutputFormat::Json).unwrap();
//! println!("{}", json);
//! ```

pub mod categorizer;
pub mod config;
pub mod entry;
pub mod graph;
pub mod models;
pub mod output;
pub mod parsers;
pub mod resolver;

// Re-exports for convenience
pub use categorizer::ImportCategorizer;
pub use config::{BuildOptions, ConfigError, GraphConfig};
pub use entry::{collect_source_files, discover_entries, DiscoveryError};
pub use graph::{build_graph, GraphBuilder, GraphError};
pub use models::*;
pub use output::{format_output, FormatError, OutputFormat};
pub use parsers::{scan_source, SpecifierScanner};
pub use resolver::resolve_local;
