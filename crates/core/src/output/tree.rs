use crate::models::{DependencyGraph, ImportKind};
use std::collections::HashSet;

/// Render the local dependency structure as an indented tree.
///
/// Roots are the scanned files nothing else imports; files only reachable
/// through a cycle are rendered as extra roots afterwards. Each file is
/// expanded once.
pub fn to_tree(graph: &DependencyGraph) -> String {
    let mut output = String::new();
    let mut expanded: HashSet<&str> = HashSet::new();

    let imported: HashSet<&str> = graph
        .edges
        .iter()
        .filter(|e| e.kind == ImportKind::Local && e.from != e.to)
        .map(|e| e.to.as_str())
        .collect();

    let roots = graph
        .nodes
        .iter()
        .map(|n| n.path.as_str())
        .filter(|path| !imported.contains(path));

    for root in roots {
        render_root(graph, root, &mut expanded, &mut output);
    }
    for node in &graph.nodes {
        if !expanded.contains(node.path.as_str()) {
            render_root(graph, &node.path, &mut expanded, &mut output);
        }
    }

    push_summary(graph, &mut output);
    output
}

fn render_root<'a>(
    graph: &'a DependencyGraph,
    path: &'a str,
    expanded: &mut HashSet<&'a str>,
    output: &mut String,
) {
    output.push_str(path);
    output.push('\n');
    expanded.insert(path);

    let mut stack = vec![path];
    render_children(graph, path, "", &mut stack, expanded, output);
}

fn render_children<'a>(
    graph: &'a DependencyGraph,
    path: &'a str,
    prefix: &str,
    stack: &mut Vec<&'a str>,
    expanded: &mut HashSet<&'a str>,
    output: &mut String,
) {
    let children: Vec<&str> = graph.local_edges_from(path).map(|e| e.to.as_str()).collect();

    for (i, target) in children.iter().copied().enumerate() {
        let last = i + 1 == children.len();
        let marker = if stack.contains(&target) {
            " (circular)"
        } else if !graph.contains_node(target) {
            " (not scanned)"
        } else if expanded.contains(target) {
            " (see above)"
        } else {
            ""
        };

        output.push_str(&format!(
            "{}{}{}{}\n",
            prefix,
            if last { "└── " } else { "├── " },
            target,
            marker
        ));

        if marker.is_empty() {
            expanded.insert(target);
            stack.push(target);
            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            render_children(graph, target, &child_prefix, stack, expanded, output);
            stack.pop();
        }
    }
}

fn push_summary(graph: &DependencyGraph, output: &mut String) {
    output.push('\n');

    if !graph.externals.is_empty() {
        output.push_str(&format!(
            "External ({}): {}\n",
            graph.externals.len(),
            graph.externals.join(", ")
        ));
    }
    if !graph.builtins.is_empty() {
        output.push_str(&format!(
            "Builtin ({}): {}\n",
            graph.builtins.len(),
            graph.builtins.join(", ")
        ));
    }
    if !graph.unresolved.is_empty() {
        output.push_str(&format!("Unresolved ({}):\n", graph.unresolved.len()));
        for unresolved in &graph.unresolved {
            output.push_str(&format!(
                "  {} -> {}\n",
                unresolved.from, unresolved.specifier
            ));
        }
    }

    output.push_str(&format!(
        "{} files, {} local edges\n",
        graph.nodes.len(),
        graph.local_edge_count()
    ));
}
