use super::FormatError;
use crate::models::DependencyGraph;

/// Serialize DependencyGraph to YAML
pub fn to_yaml(graph: &DependencyGraph) -> Result<String, FormatError> {
    serde_yaml::to_string(graph).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_graph;

    #[test]
    fn test_to_yaml() {
        let yaml = to_yaml(&sample_graph()).unwrap();
        assert!(yaml.contains("nodes:"));
        assert!(yaml.contains("depCount: 4"));
        assert!(yaml.contains("type: external"));
    }
}
