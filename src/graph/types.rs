use serde::{Deserialize, Serialize};

/// Node classification as reported by the analysis.
///
/// Unknown tags are kept verbatim in `Other` so they can still be shown in the
/// tooltip; layout-wise they always join the outer tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeCategory {
    Entity,
    Action,
    Risk,
    Outcome,
    Other(String),
}

impl NodeCategory {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "entity" => NodeCategory::Entity,
            "action" => NodeCategory::Action,
            "risk" => NodeCategory::Risk,
            "outcome" => NodeCategory::Outcome,
            other => NodeCategory::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            NodeCategory::Entity => "entity",
            NodeCategory::Action => "action",
            NodeCategory::Risk => "risk",
            NodeCategory::Outcome => "outcome",
            NodeCategory::Other(tag) => tag,
        }
    }
}

impl From<String> for NodeCategory {
    fn from(tag: String) -> Self {
        NodeCategory::from_tag(&tag)
    }
}

impl From<NodeCategory> for String {
    fn from(category: NodeCategory) -> Self {
        category.as_tag().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub category: NodeCategory,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category,
        }
    }
}

/// A directed, labeled relation. Endpoints may name ids that do not exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub label: String,
}

impl GraphEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        }
    }

    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
