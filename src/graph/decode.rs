// Decoding of the analysis payload into a `Graph`.
//
// The payload is loosely shaped: it is either `{ nodes, edges }` or the same
// object nested under `graph`. Labels are optional, and edge endpoints may use
// `source`/`target` instead of `from`/`to`. Nothing beyond JSON shape is
// validated; unknown categories and dangling endpoints pass through.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::types::{Graph, GraphEdge, GraphNode, NodeCategory};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid graph payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid render config: {0}")]
    Config(#[source] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(rename = "type", default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    #[serde(alias = "source")]
    from: String,
    #[serde(alias = "target")]
    to: String,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawGraph {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<RawEdge>,
}

impl From<RawGraph> for Graph {
    fn from(raw: RawGraph) -> Self {
        let nodes = raw
            .nodes
            .into_iter()
            .map(|n| {
                let label = n.label.unwrap_or_else(|| n.id.clone());
                let category = NodeCategory::from_tag(n.category.as_deref().unwrap_or(""));
                GraphNode { id: n.id, label, category }
            })
            .collect();
        let edges = raw
            .edges
            .into_iter()
            .map(|e| GraphEdge {
                from: e.from,
                to: e.to,
                label: e.label.unwrap_or_default(),
            })
            .collect();
        Graph { nodes, edges }
    }
}

/// Parse a graph from the analysis JSON payload.
pub fn parse_graph(input: &str) -> Result<Graph, GraphError> {
    let mut value: Value = serde_json::from_str(input)?;
    let raw: RawGraph = match value.get_mut("graph") {
        Some(inner) => serde_json::from_value(inner.take())?,
        None => serde_json::from_value(value)?,
    };
    let graph = Graph::from(raw);
    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "decoded graph payload"
    );
    Ok(graph)
}
