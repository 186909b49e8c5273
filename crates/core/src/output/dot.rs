use crate::models::{DependencyGraph, ImportKind};
use std::collections::HashSet;

/// Render the graph in Graphviz DOT format
pub fn to_dot(graph: &DependencyGraph) -> String {
    let mut output = String::new();
    output.push_str("digraph dependencies {\n");
    output.push_str("  rankdir=LR;\n");
    output.push_str("  node [shape=box];\n");

    for node in &graph.nodes {
        output.push_str(&format!("  {};\n", quote(&node.path)));
    }

    let mut declared: HashSet<&str> = HashSet::new();
    for edge in &graph.edges {
        let style = match edge.kind {
            ImportKind::Local => continue,
            ImportKind::External => "dashed",
            ImportKind::Builtin => "dotted",
        };
        if declared.insert(edge.to.as_str()) {
            output.push_str(&format!(
                "  {} [label={}, shape=ellipse, style={}];\n",
                quote(&edge.to),
                quote(&edge.specifier),
                style
            ));
        }
    }

    for edge in &graph.edges {
        output.push_str(&format!("  {} -> {};\n", quote(&edge.from), quote(&edge.to)));
    }

    output.push_str("}\n");
    output
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_graph;

    #[test]
    fn test_to_dot() {
        let dot = to_dot(&sample_graph());

        assert!(dot.starts_with("digraph dependencies {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("  \"index.js\";\n"));
        assert!(dot.contains("  \"index.js\" -> \"a.js\";\n"));
        assert!(dot.contains("  \"a.js\" -> \"c.js\";\n"));
        assert!(dot.contains(
            "  \"external:react\" [label=\"react\", shape=ellipse, style=dashed];\n"
        ));
        assert!(dot.contains("  \"builtin:fs\" [label=\"fs\", shape=ellipse, style=dotted];\n"));
        assert_eq!(dot.matches(" -> ").count(), 7);
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"we"ird\path"#), r#""we\"ird\\path""#);
    }
}
