mod dot;
mod json;
mod tree;
mod yaml;

pub use dot::to_dot;
pub use json::{to_json, to_json_compact};
pub use tree::to_tree;
pub use yaml::to_yaml;

use crate::models::DependencyGraph;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tree,
    Dot,
    Json,
    Yaml,
}

/// Render a DependencyGraph in the specified format
pub fn format_output(graph: &DependencyGraph, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Tree => Ok(to_tree(graph)),
        OutputFormat::Dot => Ok(to_dot(graph)),
        OutputFormat::Json => to_json(graph),
        OutputFormat::Yaml => to_yaml(graph),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dispatch() {
        let graph = fixtures::sample_graph();
        assert!(format_output(&graph, OutputFormat::Json)
            .unwrap()
            .contains("\"nodes\""));
        assert!(format_output(&graph, OutputFormat::Yaml)
            .unwrap()
            .contains("nodes:"));
        assert!(format_output(&graph, OutputFormat::Dot)
            .unwrap()
            .starts_with("digraph"));
        assert!(format_output(&graph, OutputFormat::Tree)
            .unwrap()
            .starts_with("index.js"));
    }
}
