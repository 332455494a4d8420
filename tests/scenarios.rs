//! End-to-end scenarios through the public session API.

use std::f64::consts::{FRAC_PI_2, PI};
use std::rc::Rc;

use riskmap_core::render::svg::to_svg;
use riskmap_core::{parse_graph, LayoutConfig, Mode, Point, Scene, ViewportSession};

const EPS: f64 = 1e-9;

fn session_with(mode: Mode, payload: &str) -> ViewportSession {
    let graph = parse_graph(payload).unwrap();
    let mut session = ViewportSession::new(mode);
    session.set_graph(Rc::new(graph));
    session
}

fn center_of(scene: &Scene, id: &str) -> Point {
    scene.node(id).unwrap_or_else(|| panic!("missing node {id}")).center()
}

fn assert_on_ring(p: Point, cfg: &LayoutConfig, rx: f64, ry: f64, angle: f64) {
    let c = cfg.center();
    let expected = Point::new(c.x + rx * angle.cos(), c.y + ry * angle.sin());
    assert!(
        (p.x - expected.x).abs() < EPS && (p.y - expected.y).abs() < EPS,
        "{p:?} != {expected:?}"
    );
}

#[test]
fn scenario_a_entity_action_risk() {
    let payload = r#"{"graph": {
        "nodes": [
            {"id": "a", "label": "Acme", "type": "entity"},
            {"id": "b", "label": "Expand", "type": "action"},
            {"id": "c", "label": "Churn", "type": "risk"}
        ],
        "edges": [
            {"from": "a", "to": "b", "label": "plans"},
            {"from": "b", "to": "c", "label": "raises"}
        ]
    }}"#;
    let cfg = LayoutConfig::full_screen();
    let mut session = session_with(Mode::FullScreen, payload);
    let scene = session.render();

    assert_eq!(center_of(&scene, "a"), cfg.center());
    assert_on_ring(center_of(&scene, "b"), &cfg, 380.0, 250.0, -FRAC_PI_2 + 0.5);
    assert_on_ring(center_of(&scene, "c"), &cfg, 540.0, 340.0, -FRAC_PI_2 + 1.0);
    assert_eq!(scene.edges.len(), 2);
    assert_eq!(scene.zoom_percent, Some(100));
    assert!(scene.tooltip.is_none());
}

#[test]
fn scenario_a_hover_dims_and_shows_tooltip() {
    let payload = r#"{
        "nodes": [
            {"id": "a", "label": "Acme", "type": "entity"},
            {"id": "b", "label": "Expand", "type": "action"},
            {"id": "c", "label": "Churn", "type": "risk"}
        ],
        "edges": [
            {"from": "a", "to": "b", "label": "plans"},
            {"from": "b", "to": "c", "label": "raises"}
        ]
    }"#;
    let mut session = session_with(Mode::Compact, payload);
    session.on_node_enter("c");
    let scene = session.render();

    assert_eq!(scene.edge("b", "c").unwrap().opacity, 1.0);
    assert_eq!(scene.edge("a", "b").unwrap().opacity, 0.1);
    assert_eq!(scene.node("c").unwrap().opacity, 1.0);
    assert_eq!(scene.node("a").unwrap().opacity, 0.3);
    let tooltip = scene.tooltip.as_ref().unwrap();
    assert_eq!(tooltip.label, "Churn");
    assert_eq!(tooltip.category, "risk");

    // A late leave from another node keeps the hover.
    session.on_node_leave("a");
    assert_eq!(session.hovered(), Some("c"));
    session.on_node_leave("c");
    assert_eq!(session.hovered(), None);
}

#[test]
fn scenario_b_dangling_edge_is_skipped() {
    let payload = r#"{
        "nodes": [
            {"id": "a", "label": "Acme", "type": "entity"},
            {"id": "b", "label": "Expand", "type": "action"},
            {"id": "c", "label": "Churn", "type": "risk"}
        ],
        "edges": [{"from": "a", "to": "zzz", "label": "x"}]
    }"#;
    let mut session = session_with(Mode::Compact, payload);
    let scene = session.render();
    assert_eq!(scene.nodes.len(), 3);
    assert!(scene.edges.is_empty());

    let svg = to_svg(&scene);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Churn"));
}

#[test]
fn scenario_c_actions_without_entity() {
    let payload = r#"{
        "nodes": [
            {"id": "p", "label": "Hire", "type": "action"},
            {"id": "q", "label": "Launch", "type": "action"}
        ],
        "edges": []
    }"#;
    let cfg = LayoutConfig::compact();
    let mut session = session_with(Mode::Compact, payload);
    let scene = session.render();

    assert_eq!(scene.nodes.len(), 2);
    assert_on_ring(center_of(&scene, "p"), &cfg, 150.0, 150.0, -FRAC_PI_2 + 0.5);
    assert_on_ring(center_of(&scene, "q"), &cfg, 150.0, 150.0, -FRAC_PI_2 + 0.5 + PI);
    assert!(scene.nodes.iter().all(|n| n.center() != cfg.center()));
}

#[test]
fn zoom_is_clamped_through_the_session() {
    let mut session = ViewportSession::new(Mode::FullScreen);
    for _ in 0..40 {
        session.zoom_in();
    }
    assert_eq!(session.viewport_state().unwrap().scale, 4.0);
    session.on_wheel(1_000_000.0, Some(Point::new(10.0, 10.0)));
    assert_eq!(session.viewport_state().unwrap().scale, 0.2);
    assert_eq!(session.render().zoom_percent, Some(20));
}

#[test]
fn empty_graph_renders_empty_scene() {
    let mut session = ViewportSession::new(Mode::FullScreen);
    let scene = session.render();
    assert!(scene.is_empty());
    assert!(scene.edges.is_empty());
    assert!(scene.legend.is_empty());
}
