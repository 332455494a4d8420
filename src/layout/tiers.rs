use crate::graph::{GraphNode, NodeCategory};

/// Placement tier. Determines ring radius and phase.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Entities, innermost.
    Core,
    Action,
    /// Risks, outcomes and anything unrecognized.
    Outer,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Core, Tier::Action, Tier::Outer];

    pub fn of(category: &NodeCategory) -> Tier {
        match category {
            NodeCategory::Entity => Tier::Core,
            NodeCategory::Action => Tier::Action,
            NodeCategory::Risk | NodeCategory::Outcome | NodeCategory::Other(_) => Tier::Outer,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tier::Core => 0,
            Tier::Action => 1,
            Tier::Outer => 2,
        }
    }

    /// Phase offset in radians, staggering rings so labels do not line up radially.
    pub fn phase(self) -> f64 {
        match self {
            Tier::Core => 0.0,
            Tier::Action => 0.5,
            Tier::Outer => 1.0,
        }
    }
}

/// Nodes grouped by tier, each tier in placement order.
#[derive(Debug, Default)]
pub struct TierPartition<'a> {
    pub core: Vec<&'a GraphNode>,
    pub action: Vec<&'a GraphNode>,
    /// Ordered risk, then outcome, then other; input order within each.
    pub outer: Vec<&'a GraphNode>,
}

impl<'a> TierPartition<'a> {
    pub fn members(&self, tier: Tier) -> &[&'a GraphNode] {
        match tier {
            Tier::Core => &self.core,
            Tier::Action => &self.action,
            Tier::Outer => &self.outer,
        }
    }

    pub fn len(&self) -> usize {
        self.core.len() + self.action.len() + self.outer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn partition(nodes: &[GraphNode]) -> TierPartition<'_> {
    let mut tiers = TierPartition::default();
    let mut outcomes = Vec::new();
    let mut others = Vec::new();

    for node in nodes {
        match &node.category {
            NodeCategory::Entity => tiers.core.push(node),
            NodeCategory::Action => tiers.action.push(node),
            NodeCategory::Risk => tiers.outer.push(node),
            NodeCategory::Outcome => outcomes.push(node),
            NodeCategory::Other(_) => others.push(node),
        }
    }

    tiers.outer.extend(outcomes);
    tiers.outer.extend(others);
    tiers
}
