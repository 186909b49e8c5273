use super::FormatError;
use crate::models::DependencyGraph;

/// Serialize DependencyGraph to pretty-printed JSON
pub fn to_json(graph: &DependencyGraph) -> Result<String, FormatError> {
    serde_json::to_string_pretty(graph).map_err(FormatError::from)
}

/// Serialize DependencyGraph to compact JSON
pub fn to_json_compact(graph: &DependencyGraph) -> Result<String, FormatError> {
    serde_json::to_string(graph).map_err(FormatError::from)
}
