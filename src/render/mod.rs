// Scene construction.
//
// Turns positioned nodes plus the current hover and camera into a `Scene`:
// - edges whose endpoints are not both positioned are dropped
// - hovering a node dims everything it does not touch
// - in full-screen, strokes and fonts are divided by the zoom so they keep
//   their on-screen size
// - labels are omitted (never truncated) below their zoom thresholds
//
// Submodules:
// - svg: standalone SVG document for a scene
// - canvas: paints a scene onto a 2d canvas context

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, GraphError, NodeCategory};
use crate::interaction::InteractionState;
use crate::layout::{position_or_center, LayoutConfig, Point, PositionMap, Tier};
use crate::output::{LegendEntry, Scene, SceneEdge, SceneLabel, SceneNode, Tooltip};
use crate::style::ColorPolicy;
use crate::viewport::ViewportState;

pub mod canvas;
pub mod svg;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub node_radius: f64,
    pub hovered_node_radius: f64,
    pub hover_ring_radius: f64,
    pub node_stroke_width: f64,
    pub edge_stroke_width: f64,
    /// Opacity of nodes other than the hovered one.
    pub dimmed_node_opacity: f64,
    /// Opacity of edges not touching the hovered node.
    pub dimmed_edge_opacity: f64,
    pub node_label_font_size: f64,
    pub edge_label_font_size: f64,
    /// Node labels are drawn only above this zoom.
    pub node_label_min_scale: f64,
    /// Edge labels are drawn only above this zoom.
    pub edge_label_min_scale: f64,
    /// Divide stroke widths and font sizes by the zoom.
    pub compensate_scale: bool,
    /// Screen-space corner of the tooltip panel.
    pub tooltip_anchor: Point,
    pub show_legend: bool,
}

impl RenderConfig {
    pub fn compact() -> Self {
        Self {
            node_radius: 14.0,
            hovered_node_radius: 18.0,
            hover_ring_radius: 24.0,
            node_stroke_width: 2.0,
            edge_stroke_width: 1.5,
            dimmed_node_opacity: 0.3,
            dimmed_edge_opacity: 0.1,
            node_label_font_size: 11.0,
            edge_label_font_size: 9.0,
            node_label_min_scale: 0.4,
            edge_label_min_scale: 0.6,
            compensate_scale: false,
            tooltip_anchor: Point::new(16.0, 16.0),
            show_legend: true,
        }
    }

    pub fn full_screen() -> Self {
        Self {
            dimmed_node_opacity: 0.2,
            compensate_scale: true,
            ..Self::compact()
        }
    }

    /// Apply a JSON object of field overrides on top of this config.
    pub fn with_overrides(&self, json: &str) -> Result<Self, GraphError> {
        let mut base = serde_json::to_value(self).map_err(GraphError::Config)?;
        let patch: serde_json::Value = serde_json::from_str(json).map_err(GraphError::Config)?;
        let (Some(base_fields), serde_json::Value::Object(patch_fields)) = (base.as_object_mut(), patch) else {
            return Err(GraphError::Config(serde_json::Error::custom(
                "render config overrides must be a JSON object",
            )));
        };
        base_fields.extend(patch_fields);
        serde_json::from_value(base).map_err(GraphError::Config)
    }

    pub fn node_radius(&self, hovered: bool) -> f64 {
        if hovered { self.hovered_node_radius } else { self.node_radius }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::compact()
    }
}

/// Everything one frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub graph: &'a Graph,
    pub positions: &'a PositionMap,
    pub layout: &'a LayoutConfig,
    pub interaction: &'a InteractionState,
    /// `None` in compact mode (fixed camera).
    pub viewport: Option<ViewportState>,
}

impl<'a> FrameInput<'a> {
    fn transform(&self) -> ViewportState {
        self.viewport.unwrap_or(ViewportState::IDENTITY)
    }

    /// Hovered id, if it names a positioned node.
    fn hovered(&self) -> Option<&'a str> {
        self.interaction
            .hovered()
            .filter(|id| self.positions.contains_key(*id))
    }

    fn position(&self, id: &str) -> Point {
        position_or_center(self.positions, id, self.layout)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderPipeline {
    config: RenderConfig,
    colors: ColorPolicy,
}

impl RenderPipeline {
    pub fn new(config: RenderConfig, colors: ColorPolicy) -> Self {
        Self { config, colors }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    pub fn render(&self, frame: &FrameInput<'_>) -> Scene {
        let transform = frame.transform();
        let palette = self.colors.palette();
        let hovered = frame.hovered();
        let k = if self.config.compensate_scale { 1.0 / transform.scale } else { 1.0 };
        let show_node_labels = transform.scale > self.config.node_label_min_scale;
        let show_edge_labels = transform.scale > self.config.edge_label_min_scale;

        let mut dropped = 0usize;
        let edges: Vec<SceneEdge> = frame
            .graph
            .edges
            .iter()
            .filter_map(|edge| {
                let (Some(&from), Some(&to)) =
                    (frame.positions.get(&edge.from), frame.positions.get(&edge.to))
                else {
                    tracing::trace!(from = %edge.from, to = %edge.to, "dropping dangling edge");
                    dropped += 1;
                    return None;
                };

                let connected = hovered.is_some_and(|id| edge.touches(id));
                let dimmed = hovered.is_some() && !connected;
                let (start, end) = clip_to_rims(
                    from,
                    to,
                    self.config.node_radius(hovered == Some(edge.from.as_str())),
                    self.config.node_radius(hovered == Some(edge.to.as_str())),
                );

                let label = (show_edge_labels && !dimmed && !edge.label.is_empty()).then(|| {
                    let font_size = self.config.edge_label_font_size * k;
                    SceneLabel {
                        text: edge.label.clone(),
                        x: (from.x + to.x) / 2.0,
                        y: (from.y + to.y) / 2.0 - font_size / 2.0,
                        font_size,
                        color: palette.edge_label,
                    }
                });

                Some(SceneEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    start,
                    end,
                    color: palette.edge,
                    stroke_width: self.config.edge_stroke_width * k,
                    opacity: if dimmed { self.config.dimmed_edge_opacity } else { 1.0 },
                    connected,
                    label,
                })
            })
            .collect();

        if dropped > 0 {
            tracing::debug!(dropped, "dropped dangling edges");
        }

        let nodes: Vec<SceneNode> = frame
            .graph
            .nodes
            .iter()
            .map(|node| {
                let is_hovered = hovered == Some(node.id.as_str());
                let center = frame.position(&node.id);
                let radius = self.config.node_radius(is_hovered);
                let label = show_node_labels.then(|| {
                    let font_size = self.config.node_label_font_size * k;
                    SceneLabel {
                        text: node.label.clone(),
                        x: center.x,
                        y: center.y + radius + font_size,
                        font_size,
                        color: palette.node_label,
                    }
                });

                SceneNode {
                    id: node.id.clone(),
                    category: node.category.as_tag().to_string(),
                    x: center.x,
                    y: center.y,
                    radius,
                    fill: self.colors.node_fill(is_hovered),
                    stroke: self.colors.category_color(&node.category),
                    stroke_width: self.config.node_stroke_width,
                    opacity: if hovered.is_some() && !is_hovered {
                        self.config.dimmed_node_opacity
                    } else {
                        1.0
                    },
                    hovered: is_hovered,
                    ring_radius: is_hovered.then_some(self.config.hover_ring_radius),
                    label,
                }
            })
            .collect();

        let tooltip = hovered
            .and_then(|id| frame.graph.nodes.iter().rev().find(|n| n.id == id))
            .map(|node| Tooltip {
                label: node.label.clone(),
                category: node.category.as_tag().to_string(),
                x: self.config.tooltip_anchor.x,
                y: self.config.tooltip_anchor.y,
                background: palette.tooltip_background,
                color: palette.tooltip_text,
                accent: self.colors.category_color(&node.category),
            });

        let legend = if self.config.show_legend {
            self.legend(frame.graph)
        } else {
            Vec::new()
        };

        Scene {
            width: frame.layout.width,
            height: frame.layout.height,
            background: palette.background,
            transform,
            zoom_percent: frame.viewport.map(|v| (v.scale * 100.0).round() as u32),
            edges,
            nodes,
            tooltip,
            legend,
        }
    }

    /// Topmost node under a screen-space point.
    pub fn pick_node(&self, frame: &FrameInput<'_>, screen: Point) -> Option<String> {
        let scene_point = frame.transform().to_scene(screen);
        let hovered = frame.hovered();
        // Nodes are drawn in order, so the last hit is on top.
        frame
            .graph
            .nodes
            .iter()
            .rev()
            .find(|node| {
                let radius = self.config.node_radius(hovered == Some(node.id.as_str()));
                frame.position(&node.id).distance(&scene_point) <= radius
            })
            .map(|node| node.id.clone())
    }

    /// Categories present in the graph, in tier order.
    fn legend(&self, graph: &Graph) -> Vec<LegendEntry> {
        let mut categories: Vec<&NodeCategory> = Vec::new();
        for node in &graph.nodes {
            if !categories.contains(&&node.category) {
                categories.push(&node.category);
            }
        }
        // Stable sort keeps unknown categories in first-seen order.
        categories.sort_by_key(|c| legend_rank(c));
        categories
            .into_iter()
            .map(|category| LegendEntry {
                category: category.as_tag().to_string(),
                color: self.colors.category_color(category),
            })
            .collect()
    }
}

fn legend_rank(category: &NodeCategory) -> (usize, usize) {
    let within = match category {
        NodeCategory::Risk => 0,
        NodeCategory::Outcome => 1,
        _ => 2,
    };
    (Tier::of(category).index(), within)
}

/// Shorten the segment between two centers so it starts and ends on the rims.
fn clip_to_rims(from: Point, to: Point, from_radius: f64, to_radius: f64) -> (Point, Point) {
    let len = from.distance(&to);
    if len <= from_radius + to_radius {
        return (from, to);
    }
    let ux = (to.x - from.x) / len;
    let uy = (to.y - from.y) / len;
    (
        Point::new(from.x + ux * from_radius, from.y + uy * from_radius),
        Point::new(to.x - ux * to_radius, to.y - uy * to_radius),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphEdge, GraphNode};
    use crate::layout::layout_nodes;

    fn sample_graph() -> Graph {
        Graph::new(
            vec![
                GraphNode::new("a", "Acme", NodeCategory::Entity),
                GraphNode::new("b", "Acquire", NodeCategory::Action),
                GraphNode::new("c", "Debt", NodeCategory::Risk),
                GraphNode::new("d", "Growth", NodeCategory::Outcome),
            ],
            vec![
                GraphEdge::new("a", "b", "leads to"),
                GraphEdge::new("b", "c", "causes"),
                GraphEdge::new("c", "d", "hurts"),
            ],
        )
    }

    struct Fixture {
        graph: Graph,
        positions: PositionMap,
        layout: LayoutConfig,
        interaction: InteractionState,
    }

    impl Fixture {
        fn new(layout: LayoutConfig) -> Self {
            let graph = sample_graph();
            let positions = layout_nodes(&graph.nodes, &layout);
            Self { graph, positions, layout, interaction: InteractionState::new() }
        }

        fn frame(&self, viewport: Option<ViewportState>) -> FrameInput<'_> {
            FrameInput {
                graph: &self.graph,
                positions: &self.positions,
                layout: &self.layout,
                interaction: &self.interaction,
                viewport,
            }
        }
    }

    fn zoomed(scale: f64) -> Option<ViewportState> {
        Some(ViewportState { offset_x: 0.0, offset_y: 0.0, scale })
    }

    #[test]
    fn test_no_hover_is_fully_opaque() {
        let fx = Fixture::new(LayoutConfig::compact());
        let scene = RenderPipeline::default().render(&fx.frame(None));
        assert!(scene.nodes.iter().all(|n| n.opacity == 1.0 && n.ring_radius.is_none()));
        assert!(scene.edges.iter().all(|e| e.opacity == 1.0 && !e.connected));
        assert!(scene.tooltip.is_none());
        assert_eq!(scene.zoom_percent, None);
    }

    #[test]
    fn test_hover_dims_unrelated() {
        let mut fx = Fixture::new(LayoutConfig::compact());
        fx.interaction.on_node_enter("b");
        let scene = RenderPipeline::default().render(&fx.frame(None));

        assert!(scene.edge("a", "b").unwrap().connected);
        assert!(scene.edge("b", "c").unwrap().connected);
        let far = scene.edge("c", "d").unwrap();
        assert_eq!(far.opacity, 0.1);
        assert!(far.label.is_none());

        let b = scene.node("b").unwrap();
        assert_eq!(b.opacity, 1.0);
        assert_eq!(b.radius, 18.0);
        assert_eq!(b.ring_radius, Some(24.0));
        assert_eq!(b.fill, ColorPolicy::default().node_fill(true));
        assert_eq!(scene.node("a").unwrap().opacity, 0.3);

        let tooltip = scene.tooltip.unwrap();
        assert_eq!(tooltip.label, "Acquire");
        assert_eq!(tooltip.category, "action");
    }

    #[test]
    fn test_full_screen_dims_deeper() {
        let mut fx = Fixture::new(LayoutConfig::full_screen());
        fx.interaction.on_node_enter("a");
        let pipeline = RenderPipeline::new(RenderConfig::full_screen(), ColorPolicy::default());
        let scene = pipeline.render(&fx.frame(zoomed(1.0)));
        assert_eq!(scene.node("d").unwrap().opacity, 0.2);
    }

    #[test]
    fn test_hover_on_unknown_id_is_ignored() {
        let mut fx = Fixture::new(LayoutConfig::compact());
        fx.interaction.on_node_enter("ghost");
        let scene = RenderPipeline::default().render(&fx.frame(None));
        assert!(scene.tooltip.is_none());
        assert!(scene.nodes.iter().all(|n| n.opacity == 1.0));
    }

    #[test]
    fn test_scale_compensation() {
        let fx = Fixture::new(LayoutConfig::full_screen());
        let pipeline = RenderPipeline::new(RenderConfig::full_screen(), ColorPolicy::default());
        let scene = pipeline.render(&fx.frame(zoomed(2.0)));
        assert_eq!(scene.edges[0].stroke_width, 0.75);
        assert_eq!(scene.nodes[0].label.as_ref().unwrap().font_size, 5.5);
        assert_eq!(scene.nodes[0].radius, 14.0);
        assert_eq!(scene.zoom_percent, Some(200));
    }

    #[test]
    fn test_lod_thresholds() {
        let fx = Fixture::new(LayoutConfig::full_screen());
        let pipeline = RenderPipeline::new(RenderConfig::full_screen(), ColorPolicy::default());

        let mid = pipeline.render(&fx.frame(zoomed(0.5)));
        assert!(mid.nodes.iter().all(|n| n.label.is_some()));
        assert!(mid.edges.iter().all(|e| e.label.is_none()));

        let far = pipeline.render(&fx.frame(zoomed(0.4)));
        assert!(far.nodes.iter().all(|n| n.label.is_none()));

        let near = pipeline.render(&fx.frame(zoomed(0.61)));
        assert!(near.edges.iter().all(|e| e.label.is_some()));
    }

    #[test]
    fn test_dangling_edges_are_dropped() {
        let mut fx = Fixture::new(LayoutConfig::compact());
        fx.graph.edges.push(GraphEdge::new("a", "zzz", "x"));
        fx.graph.edges.push(GraphEdge::new("yyy", "b", "y"));
        let scene = RenderPipeline::default().render(&fx.frame(None));
        assert_eq!(scene.edges.len(), 3);
        assert!(scene.edges.iter().all(|e| e.to != "zzz" && e.from != "yyy"));
    }

    #[test]
    fn test_edges_are_clipped_to_rims() {
        let fx = Fixture::new(LayoutConfig::compact());
        let scene = RenderPipeline::default().render(&fx.frame(None));
        let edge = scene.edge("a", "b").unwrap();
        let a = scene.node("a").unwrap().center();
        let b = scene.node("b").unwrap().center();
        assert!((edge.start.distance(&a) - 14.0).abs() < 1e-9);
        assert!((edge.end.distance(&b) - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_clip_degenerate_segment() {
        let p = Point::new(5.0, 5.0);
        assert_eq!(clip_to_rims(p, p, 14.0, 14.0), (p, p));
    }

    #[test]
    fn test_pick_node_through_transform() {
        let fx = Fixture::new(LayoutConfig::full_screen());
        let pipeline = RenderPipeline::new(RenderConfig::full_screen(), ColorPolicy::default());
        let viewport = ViewportState { offset_x: 40.0, offset_y: -20.0, scale: 2.0 };
        let a = fx.positions["a"];
        let screen = viewport.to_screen(Point::new(a.x + 10.0, a.y));
        let frame = fx.frame(Some(viewport));
        assert_eq!(pipeline.pick_node(&frame, screen), Some("a".to_string()));
        assert_eq!(pipeline.pick_node(&frame, Point::new(-500.0, -500.0)), None);
    }

    #[test]
    fn test_legend_order() {
        let mut fx = Fixture::new(LayoutConfig::compact());
        fx.graph.nodes.insert(0, GraphNode::new("v", "Vendor", NodeCategory::Other("vendor".into())));
        let scene = RenderPipeline::default().render(&fx.frame(None));
        let order: Vec<_> = scene.legend.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(order, ["entity", "action", "risk", "outcome", "vendor"]);
    }

    #[test]
    fn test_config_overrides() {
        let cfg = RenderConfig::full_screen()
            .with_overrides(r#"{"node_radius": 10, "show_legend": false}"#)
            .unwrap();
        assert_eq!(cfg.node_radius, 10.0);
        assert!(!cfg.show_legend);
        assert!(cfg.compensate_scale);

        assert!(RenderConfig::compact().with_overrides("[1, 2]").is_err());
        assert!(RenderConfig::compact().with_overrides(r#"{"node_radiu": 3}"#).is_err());
    }
}
