use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use mta_rust_depgraph_core::{
    collect_source_files, discover_entries, format_output, GraphBuilder, GraphConfig,
    OutputFormat,
};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "depgraph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Map the module dependency graph of Python and Node.js/TypeScript projects")]
#[command(long_about = "Scans entry files for import/require statements, resolves local \
    imports to files on disk and follows them breadth-first, classifying everything else as \
    builtin or external. Supports Python (.py), JavaScript (.js, .mjs, .cjs, .jsx) and \
    TypeScript (.ts, .tsx, .mts, .cts) files.\n\n\
    Without ENTRY arguments, entry points are discovered from package.json, pyproject.toml \
    and conventional file names (index.js, main.py, ...). Use --all to start from every \
    source file instead.")]
pub struct Args {
    /// Entry files (absolute or relative to --root)
    pub entries: Vec<PathBuf>,

    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Tree)]
    pub format: OutputFormatArg,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of hops to follow from an entry
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Emit edges for external packages
    #[arg(long)]
    pub include_external: bool,

    /// Emit edges for builtin modules
    #[arg(long)]
    pub include_builtin: bool,

    /// Use every source file under the root as an entry
    #[arg(long, conflicts_with = "entries")]
    pub all: bool,

    /// Config file (defaults to depgraph.toml in the root, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Additional ignore patterns for --all (glob style)
    #[arg(long, action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Ignore file path for --all (defaults to .gitignore)
    #[arg(long)]
    pub ignore_file: Option<PathBuf>,

    /// Include node_modules / .venv with --all
    #[arg(long)]
    pub include_deps: bool,

    /// Show verbose progress and debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Tree,
    Dot,
    Json,
    Yaml,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Tree => OutputFormat::Tree,
            OutputFormatArg::Dot => OutputFormat::Dot,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Config file first, then flags on top
    let mut config = GraphConfig::load(args.root.clone(), args.config.as_deref())
        .context("failed to load configuration")?
        .with_ignore_patterns(args.ignore.clone());

    if args.include_external {
        config = config.with_external_edges(true);
    }
    if args.include_builtin {
        config = config.with_builtin_edges(true);
    }
    if args.include_deps {
        config = config.with_include_deps(true);
    }
    if let Some(max_depth) = args.max_depth {
        config = config.with_max_depth(max_depth);
    }
    if let Some(ignore_file) = args.ignore_file {
        config = config.with_ignore_file(ignore_file);
    }

    let entries: Vec<PathBuf> = if args.all {
        collect_source_files(&config)?
            .into_iter()
            .map(PathBuf::from)
            .collect()
    } else if !args.entries.is_empty() {
        args.entries.clone()
    } else {
        discover_entries(&config.root)
            .context("failed to discover entry points")?
            .into_iter()
            .map(PathBuf::from)
            .collect()
    };

    if entries.is_empty() {
        bail!(
            "no entry points found in {} (pass entry files or use --all)",
            config.root.display()
        );
    }
    log::info!("building graph from {} entry point(s)", entries.len());

    // Show progress if verbose
    let spinner = if args.verbose {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("invalid progress template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Building dependency graph...");
        Some(pb)
    } else {
        None
    };

    let builder = GraphBuilder::new(config.build_options());
    let graph = builder.build(&entries)?;

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Scanned {} files, {} edges",
            graph.nodes.len(),
            graph.edges.len()
        ));
    }

    let output = format_output(&graph, args.format.into())?;

    if let Some(path) = args.output {
        fs::write(&path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?;
        if args.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        print!("{}", output);
    }

    Ok(())
}
