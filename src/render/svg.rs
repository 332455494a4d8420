//! Standalone SVG export of a scene.

use std::fmt::Write as _;

use crate::output::{Scene, SceneLabel, Tooltip};

const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

pub fn to_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    let (w, h) = (scene.width, scene.height);
    let t = scene.transform;

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    let _ = write!(svg, "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>", scene.background);

    // Edges share a single color.
    if let Some(edge) = scene.edges.first() {
        let _ = write!(
            svg,
            "<defs><marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker></defs>",
            edge.color
        );
    }

    let _ = write!(
        svg,
        "<g transform=\"translate({:.2} {:.2}) scale({:.4})\">",
        t.offset_x, t.offset_y, t.scale
    );

    for edge in &scene.edges {
        let _ = write!(
            svg,
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{:.3}\" opacity=\"{}\" marker-end=\"url(#arrow)\"/>",
            edge.start.x, edge.start.y, edge.end.x, edge.end.y, edge.color, edge.stroke_width, edge.opacity
        );
        if let Some(label) = &edge.label {
            text_svg(&mut svg, label, edge.opacity);
        }
    }

    for node in &scene.nodes {
        let _ = write!(svg, "<g opacity=\"{}\">", node.opacity);
        if let Some(ring) = node.ring_radius {
            let _ = write!(
                svg,
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{ring}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\" opacity=\"0.5\"/>",
                node.x, node.y, node.stroke
            );
        }
        let _ = write!(
            svg,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            node.x, node.y, node.radius, node.fill, node.stroke, node.stroke_width
        );
        if let Some(label) = &node.label {
            text_svg(&mut svg, label, 1.0);
        }
        svg.push_str("</g>");
    }

    svg.push_str("</g>");

    if let Some(tooltip) = &scene.tooltip {
        tooltip_svg(&mut svg, tooltip);
    }

    svg.push_str("</svg>");
    svg
}

fn text_svg(svg: &mut String, label: &SceneLabel, opacity: f64) {
    let _ = write!(
        svg,
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{FONT_FAMILY}\" font-size=\"{:.2}\" fill=\"{}\" opacity=\"{}\">{}</text>",
        label.x,
        label.y,
        label.font_size,
        label.color,
        opacity,
        escape_xml(&label.text)
    );
}

fn tooltip_svg(svg: &mut String, tooltip: &Tooltip) {
    // Rough width estimate; the panel only has to fit a short label.
    let chars = tooltip.label.chars().count().max(tooltip.category.chars().count());
    let width = 24.0 + chars as f64 * 7.0;
    let _ = write!(
        svg,
        "<g transform=\"translate({:.2} {:.2})\"><rect width=\"{width:.2}\" height=\"44\" rx=\"6\" fill=\"{}\" stroke=\"{}\"/>",
        tooltip.x, tooltip.y, tooltip.background, tooltip.accent
    );
    let _ = write!(
        svg,
        "<text x=\"12\" y=\"18\" font-family=\"{FONT_FAMILY}\" font-size=\"12\" fill=\"{}\">{}</text>",
        tooltip.color,
        escape_xml(&tooltip.label)
    );
    let _ = write!(
        svg,
        "<text x=\"12\" y=\"34\" font-family=\"{FONT_FAMILY}\" font-size=\"10\" fill=\"{}\">{}</text></g>",
        tooltip.accent,
        escape_xml(&tooltip.category)
    );
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, GraphEdge, GraphNode, NodeCategory};
    use crate::interaction::InteractionState;
    use crate::layout::{layout_nodes, LayoutConfig};
    use crate::render::{FrameInput, RenderPipeline};

    fn scene(hover: Option<&str>) -> Scene {
        let graph = Graph::new(
            vec![
                GraphNode::new("a", "R&D <core>", NodeCategory::Entity),
                GraphNode::new("b", "Ship", NodeCategory::Action),
            ],
            vec![GraphEdge::new("a", "b", "drives")],
        );
        let layout = LayoutConfig::compact();
        let positions = layout_nodes(&graph.nodes, &layout);
        let mut interaction = InteractionState::new();
        if let Some(id) = hover {
            interaction.on_node_enter(id);
        }
        RenderPipeline::default().render(&FrameInput {
            graph: &graph,
            positions: &positions,
            layout: &layout,
            interaction: &interaction,
            viewport: None,
        })
    }

    #[test]
    fn test_svg_contains_elements() {
        let svg = to_svg(&scene(None));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<line").count(), 1);
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("R&amp;D &lt;core&gt;"));
        assert!(svg.contains(">drives</text>"));
    }

    #[test]
    fn test_svg_tooltip_outside_transform() {
        let svg = to_svg(&scene(Some("b")));
        let camera_end = svg.rfind("</g><g transform=\"translate(16.00 16.00)\">");
        assert!(camera_end.is_some());
        assert!(svg.contains(">action</text>"));
        // Hover ring adds a third circle.
        assert_eq!(svg.matches("<circle").count(), 3);
    }
}
