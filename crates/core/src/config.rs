use crate::models::Language;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up at the project root when none is given explicitly
pub const DEFAULT_CONFIG_FILE: &str = "depgraph.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to build glob pattern: {0}")]
    GlobError(#[from] globset::Error),
    #[error("Failed to parse gitignore: {0}")]
    GitignoreError(#[from] ignore::Error),
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    TomlError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Options consumed by the graph builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Project root; node identities are relative to it
    pub root: PathBuf,
    /// Emit edges for external packages
    pub include_external_edges: bool,
    /// Emit edges for builtin modules
    pub include_builtin_edges: bool,
    /// Maximum number of hops from an entry to expand (None = unbounded)
    pub max_depth: Option<usize>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include_external_edges: false,
            include_builtin_edges: false,
            max_depth: None,
        }
    }
}

impl BuildOptions {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    pub fn with_external_edges(mut self, include: bool) -> Self {
        self.include_external_edges = include;
        self
    }

    pub fn with_builtin_edges(mut self, include: bool) -> Self {
        self.include_builtin_edges = include;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Configuration for a depgraph run
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Project root directory
    pub root: PathBuf,
    /// Emit edges for external packages
    pub include_external_edges: bool,
    /// Emit edges for builtin modules
    pub include_builtin_edges: bool,
    /// Maximum traversal depth (None = unbounded)
    pub max_depth: Option<usize>,
    /// Additional ignore patterns (glob style) for whole-tree discovery
    pub ignore_patterns: Vec<String>,
    /// Custom ignore file path
    pub ignore_file: Option<PathBuf>,
    /// Include node_modules/.venv in whole-tree discovery
    pub include_deps: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include_external_edges: false,
            include_builtin_edges: false,
            max_depth: None,
            ignore_patterns: vec![],
            ignore_file: None,
            include_deps: false,
        }
    }
}

/// On-disk shape of `depgraph.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    max_depth: Option<usize>,
    include_external: Option<bool>,
    include_builtin: Option<bool>,
    ignore: Vec<String>,
    include_deps: Option<bool>,
}

impl GraphConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    /// Build a config for `root`, layering in a TOML config file.
    ///
    /// With `explicit` set, that file must exist. Otherwise
    /// `depgraph.toml` at the root is used when present.
    pub fn load(root: PathBuf, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = root.join(DEFAULT_CONFIG_FILE);
                default_path.is_file().then_some(default_path)
            }
        };

        let mut config = Self::new(root);
        if let Some(path) = path {
            let raw = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
                path: path.clone(),
                source,
            })?;
            let file: ConfigFile = toml::from_str(&raw).map_err(|source| {
                ConfigError::TomlError {
                    path: path.clone(),
                    source,
                }
            })?;
            log::debug!("loaded config from {}", path.display());
            config.apply_file(file);
        }

        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if file.max_depth.is_some() {
            self.max_depth = file.max_depth;
        }
        if let Some(include) = file.include_external {
            self.include_external_edges = include;
        }
        if let Some(include) = file.include_builtin {
            self.include_builtin_edges = include;
        }
        if let Some(include) = file.include_deps {
            self.include_deps = include;
        }
        self.ignore_patterns.extend(file.ignore);
    }

    pub fn with_external_edges(mut self, include: bool) -> Self {
        self.include_external_edges = include;
        self
    }

    pub fn with_builtin_edges(mut self, include: bool) -> Self {
        self.include_builtin_edges = include;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns.extend(patterns);
        self
    }

    pub fn with_ignore_file(mut self, path: PathBuf) -> Self {
        self.ignore_file = Some(path);
        self
    }

    pub fn with_include_deps(mut self, include: bool) -> Self {
        self.include_deps = include;
        self
    }

    /// Options for the graph builder
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::new(self.root.clone())
            .with_external_edges(self.include_external_edges)
            .with_builtin_edges(self.include_builtin_edges)
            .with_max_depth(self.max_depth)
    }
}

/// Filter for ignoring files and directories during whole-tree discovery
pub struct IgnoreFilter {
    root: PathBuf,
    gitignore: Option<Gitignore>,
    custom_globs: GlobSet,
    default_ignores: GlobSet,
}

impl IgnoreFilter {
    pub fn new(config: &GraphConfig) -> Result<Self, ConfigError> {
        // Load .gitignore if present
        let gitignore = if let Some(ref ignore_file) = config.ignore_file {
            let mut builder = GitignoreBuilder::new(&config.root);
            if let Some(err) = builder.add(ignore_file) {
                return Err(err.into());
            }
            Some(builder.build()?)
        } else {
            let gitignore_path = config.root.join(".gitignore");
            if gitignore_path.exists() {
                let mut builder = GitignoreBuilder::new(&config.root);
                if let Some(err) = builder.add(&gitignore_path) {
                    return Err(err.into());
                }
                Some(builder.build()?)
            } else {
                None
            }
        };

        let mut custom_builder = GlobSetBuilder::new();
        for pattern in &config.ignore_patterns {
            custom_builder.add(Glob::new(pattern)?);
        }
        let custom_globs = custom_builder.build()?;

        // Default ignores (unless include_deps is true)
        let mut default_builder = GlobSetBuilder::new();
        if !config.include_deps {
            for pattern in [
                "**/node_modules/**",
                "**/.venv/**",
                "**/venv/**",
                "**/__pycache__/**",
                "**/dist/**",
                "**/build/**",
                "**/.git/**",
                "**/target/**",
            ] {
                default_builder.add(Glob::new(pattern)?);
            }
        }
        let default_ignores = default_builder.build()?;

        Ok(Self {
            root: config.root.clone(),
            gitignore,
            custom_globs,
            default_ignores,
        })
    }

    /// Check if a path should be ignored
    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let mut probe = relative.to_path_buf();
        if is_dir {
            // Lets `**/name/**` match the directory itself
            probe.push("_");
        }

        if self.default_ignores.is_match(&probe) || self.custom_globs.is_match(relative) {
            return true;
        }

        if let Some(ref gi) = self.gitignore {
            if gi.matched(path, is_dir).is_ignore() {
                return true;
            }
        }

        false
    }

    /// Check if a file has a recognized source extension
    pub fn is_source_file(&self, path: &Path) -> bool {
        Language::from_path(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GraphConfig::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert!(config.max_depth.is_none());
        assert!(!config.include_external_edges);
        assert!(!config.include_builtin_edges);
        assert!(!config.include_deps);
    }

    #[test]
    fn test_config_builder() {
        let config = GraphConfig::new(PathBuf::from("/test"))
            .with_external_edges(true)
            .with_max_depth(2)
            .with_ignore_patterns(vec!["**/*.test.*".to_string()])
            .with_include_deps(true);

        let options = config.build_options();
        assert_eq!(options.root, PathBuf::from("/test"));
        assert!(options.include_external_edges);
        assert!(!options.include_builtin_edges);
        assert_eq!(options.max_depth, Some(2));
        assert!(config.include_deps);
    }

    #[test]
    fn test_load_default_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "max_depth = 3\ninclude_builtin = true\nignore = [\"**/fixtures/**\"]\n",
        )
        .unwrap();

        let config = GraphConfig::load(dir.path().to_path_buf(), None).unwrap();
        assert_eq!(config.max_depth, Some(3));
        assert!(config.include_builtin_edges);
        assert!(!config.include_external_edges);
        assert_eq!(config.ignore_patterns, vec!["**/fixtures/**".to_string()]);
    }

    #[test]
    fn test_load_without_file() {
        let dir = TempDir::new().unwrap();
        let config = GraphConfig::load(dir.path().to_path_buf(), None).unwrap();
        assert!(config.max_depth.is_none());
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = GraphConfig::load(dir.path().to_path_buf(), Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "max_dpeth = 3\n").unwrap();
        let err = GraphConfig::load(dir.path().to_path_buf(), None).unwrap_err();
        assert!(matches!(err, ConfigError::TomlError { .. }));
    }

    #[test]
    fn test_malformed_gitignore_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "build/\nsrc/[\n").unwrap();

        let config = GraphConfig::new(dir.path().to_path_buf());
        let err = IgnoreFilter::new(&config).err().unwrap();
        assert!(matches!(err, ConfigError::GitignoreError(_)));
    }

    #[test]
    fn test_ignore_filter_defaults() {
        let config = GraphConfig::new(PathBuf::from("/project"))
            .with_ignore_patterns(vec!["**/*.spec.js".to_string()]);
        let filter = IgnoreFilter::new(&config).unwrap();

        assert!(filter.should_ignore(Path::new("/project/node_modules"), true));
        assert!(filter.should_ignore(Path::new("/project/a/node_modules/x/index.js"), false));
        assert!(filter.should_ignore(Path::new("/project/src/a.spec.js"), false));
        assert!(!filter.should_ignore(Path::new("/project/src/a.js"), false));
        assert!(filter.is_source_file(Path::new("/project/src/a.js")));
        assert!(!filter.is_source_file(Path::new("/project/README.md")));
    }
}
