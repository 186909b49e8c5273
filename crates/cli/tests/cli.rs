//! End-to-end tests for the `depgraph` binary against small on-disk projects.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_depgraph"))
}

fn setup_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
    }
    dir
}

/// Run depgraph against `root` and assert it exits successfully.
fn run_success(root: &Path, args: &[&str]) -> String {
    let out = Command::new(binary())
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to invoke depgraph binary");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    assert!(
        out.status.success(),
        "command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
        args,
        out.status,
        stdout,
        stderr
    );
    stdout
}

/// Run depgraph against `root` and assert it fails. Returns stderr.
fn run_failure(root: &Path, args: &[&str]) -> String {
    let out = Command::new(binary())
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to invoke depgraph binary");
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    assert!(
        !out.status.success(),
        "command {:?} expected to fail but exited successfully\nstderr: {}",
        args,
        stderr
    );
    stderr
}

fn node_paths(graph: &Value) -> Vec<String> {
    graph["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["path"].as_str().unwrap().to_string())
        .collect()
}

fn js_project() -> TempDir {
    setup_project(&[
        (
            "src/index.js",
            "import { a } from './a';\nimport React from 'react';\nconst fs = require('fs');\n// import './commented'\n",
        ),
        ("src/a.js", "export * from './b';\nimport './missing';\n"),
        ("src/b.js", "import './a';\n"),
    ])
}

#[test]
fn test_json_output_shape() {
    let project = js_project();
    let stdout = run_success(project.path(), &["src/index.js", "--format", "json"]);
    let graph: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(
        node_paths(&graph),
        vec!["src/index.js", "src/a.js", "src/b.js"]
    );
    assert_eq!(graph["nodes"][0]["language"], "javascript");
    assert_eq!(graph["nodes"][0]["depCount"], 3);

    let edge = &graph["edges"][0];
    assert_eq!(edge["from"], "src/index.js");
    assert_eq!(edge["to"], "src/a.js");
    assert_eq!(edge["specifier"], "./a");
    assert_eq!(edge["type"], "local");
    assert_eq!(graph["edges"].as_array().unwrap().len(), 3);

    assert_eq!(graph["externals"], serde_json::json!(["react"]));
    assert_eq!(graph["builtins"], serde_json::json!(["fs"]));
    assert_eq!(
        graph["unresolved"],
        serde_json::json!([{"from": "src/a.js", "specifier": "./missing"}])
    );
}

#[test]
fn test_include_external_edges() {
    let project = js_project();
    let stdout = run_success(
        project.path(),
        &["src/index.js", "--format", "json", "--include-external"],
    );
    let graph: Value = serde_json::from_str(&stdout).unwrap();

    let externals: Vec<&Value> = graph["edges"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|edge| edge["type"] == "external")
        .collect();
    assert_eq!(externals.len(), 1);
    assert_eq!(externals[0]["to"], "external:react");
}

#[test]
fn test_max_depth_limits_expansion() {
    let project = js_project();
    let stdout = run_success(
        project.path(),
        &["src/index.js", "--format", "json", "--max-depth", "0"],
    );
    let graph: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(node_paths(&graph), vec!["src/index.js"]);
    assert_eq!(graph["edges"][0]["to"], "src/a.js");
}

#[test]
fn test_tree_output() {
    let project = js_project();
    let stdout = run_success(project.path(), &["src/index.js"]);

    assert!(stdout.starts_with("src/index.js\n└── src/a.js\n"));
    assert!(stdout.contains("(circular)"));
    assert!(stdout.contains("External (1): react"));
    assert!(stdout.ends_with("3 files, 3 local edges\n"));
}

#[test]
fn test_discovers_entries_from_package_json() {
    let project = setup_project(&[
        ("package.json", r#"{"name": "app", "main": "lib/main.js"}"#),
        ("lib/main.js", "require('./util');\n"),
        ("lib/util.js", ""),
    ]);
    let stdout = run_success(project.path(), &["--format", "json"]);
    let graph: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(node_paths(&graph), vec!["lib/main.js", "lib/util.js"]);
}

#[test]
fn test_python_project_with_config_file() {
    let project = setup_project(&[
        ("depgraph.toml", "include_builtin = true\n"),
        ("main.py", "import os\nfrom .pkg import helpers\nfrom .pkg.helpers import run\n"),
        ("pkg/__init__.py", ""),
        ("pkg/helpers.py", "from . import other\n"),
    ]);
    let stdout = run_success(project.path(), &["--format", "json"]);
    let graph: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(
        node_paths(&graph),
        vec!["main.py", "pkg/__init__.py", "pkg/helpers.py"]
    );
    assert!(graph["edges"]
        .as_array()
        .unwrap()
        .iter()
        .any(|edge| edge["to"] == "builtin:os" && edge["type"] == "builtin"));
}

#[test]
fn test_output_file() {
    let project = js_project();
    let out_path = project.path().join("graph.dot");
    let stdout = run_success(
        project.path(),
        &[
            "src/index.js",
            "--format",
            "dot",
            "--output",
            out_path.to_str().unwrap(),
        ],
    );

    assert!(stdout.is_empty());
    let dot = fs::read_to_string(&out_path).unwrap();
    assert!(dot.starts_with("digraph dependencies {"));
    assert!(dot.contains("\"src/index.js\" -> \"src/a.js\""));
}

#[test]
fn test_no_entry_points_fails() {
    let project = setup_project(&[("README.md", "# nothing here\n")]);
    let stderr = run_failure(project.path(), &[]);
    assert!(stderr.contains("no entry points found"));
}
