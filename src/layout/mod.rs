// Tiered ring layout for entity-relationship graphs.
//
// Goals:
// - Deterministic: no randomness, positions depend only on the category
//   partition and the tier sizes (edges are ignored)
// - Total: every node gets a position, empty tiers are skipped
// - One algorithm, two presets: compact and full-screen only differ in the
//   canvas size and radii table
//
// Submodules:
// - tiers: category -> tier partition
// - ring_placement: angular distribution of a tier around the center
// - cache: memoization keyed on graph identity
//
// Output:
// - PositionMap from node id to canvas position.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::GraphNode;

mod cache;
mod ring_placement;
mod tiers;

pub use cache::LayoutCache;
pub use ring_placement::{place_ring, ring_angle};
pub use tiers::{partition, Tier, TierPartition};

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Ellipse radii. Circular when `rx == ry`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Radii {
    pub rx: f64,
    pub ry: f64,
}

impl Radii {
    pub const fn circle(r: f64) -> Self {
        Self { rx: r, ry: r }
    }

    pub const fn ellipse(rx: f64, ry: f64) -> Self {
        Self { rx, ry }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Canvas width in scene units.
    pub width: f64,
    /// Canvas height in scene units.
    pub height: f64,
    /// Ring radii, indexed by tier (entity, action, outer).
    pub tier_radii: [Radii; 3],
}

impl LayoutConfig {
    /// Inline preview: small canvas, circular rings.
    pub fn compact() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            tier_radii: [Radii::circle(90.0), Radii::circle(150.0), Radii::circle(185.0)],
        }
    }

    /// Full-screen view: wide canvas, rings stretched to the aspect ratio.
    pub fn full_screen() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            tier_radii: [
                Radii::ellipse(200.0, 130.0),
                Radii::ellipse(380.0, 250.0),
                Radii::ellipse(540.0, 340.0),
            ],
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn radii(&self, tier: Tier) -> Radii {
        self.tier_radii[tier.index()]
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::compact()
    }
}

pub type PositionMap = HashMap<String, Point>;

/// A graph node together with its computed position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: GraphNode,
    pub x: f64,
    pub y: f64,
}

/// Attach positions to `nodes`, in input order.
pub fn positioned_nodes(nodes: &[GraphNode], positions: &PositionMap, cfg: &LayoutConfig) -> Vec<PositionedNode> {
    nodes
        .iter()
        .map(|node| {
            let p = position_or_center(positions, &node.id, cfg);
            PositionedNode { node: node.clone(), x: p.x, y: p.y }
        })
        .collect()
}

/// Compute canvas positions for `nodes`.
///
/// Later nodes sharing an id overwrite earlier ones.
pub fn layout_nodes(nodes: &[GraphNode], cfg: &LayoutConfig) -> PositionMap {
    let tiers = partition(nodes);
    let center = cfg.center();
    let mut positions: PositionMap = HashMap::with_capacity(nodes.len());

    for tier in Tier::ALL {
        let members = tiers.members(tier);
        if members.is_empty() {
            continue;
        }

        // A lone entity is the hub of the diagram.
        if tier == Tier::Core && members.len() == 1 {
            positions.insert(members[0].id.clone(), center);
            continue;
        }

        let points = place_ring(members.len(), center, cfg.radii(tier), tier.phase());
        for (node, point) in members.iter().zip(points) {
            positions.insert(node.id.clone(), point);
        }
    }

    tracing::debug!(
        nodes = nodes.len(),
        core = tiers.core.len(),
        action = tiers.action.len(),
        outer = tiers.outer.len(),
        "computed layout"
    );

    positions
}

/// Position of `id`, falling back to the canvas center for unplaced ids.
pub fn position_or_center(positions: &PositionMap, id: &str, cfg: &LayoutConfig) -> Point {
    positions.get(id).copied().unwrap_or_else(|| cfg.center())
}
