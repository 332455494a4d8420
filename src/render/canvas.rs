//! Paints a scene onto a 2d canvas context.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::layout::Point;
use crate::output::{Scene, SceneEdge, SceneLabel, SceneNode, Tooltip};

const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";
const ARROW_LENGTH: f64 = 6.0;

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("2d context has unexpected type"))
}

pub fn paint(ctx: &CanvasRenderingContext2d, scene: &Scene) -> Result<(), JsValue> {
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str(&scene.background.to_string());
    ctx.fill_rect(0.0, 0.0, scene.width, scene.height);

    let t = scene.transform;
    ctx.save();
    ctx.translate(t.offset_x, t.offset_y)?;
    ctx.scale(t.scale, t.scale)?;

    for edge in &scene.edges {
        paint_edge(ctx, edge)?;
    }
    for node in &scene.nodes {
        paint_node(ctx, node)?;
    }

    ctx.restore();

    if let Some(tooltip) = &scene.tooltip {
        paint_tooltip(ctx, tooltip)?;
    }
    Ok(())
}

fn paint_edge(ctx: &CanvasRenderingContext2d, edge: &SceneEdge) -> Result<(), JsValue> {
    let color = edge.color.to_string();
    ctx.set_global_alpha(edge.opacity);
    ctx.set_stroke_style_str(&color);
    ctx.set_line_width(edge.stroke_width);
    ctx.begin_path();
    ctx.move_to(edge.start.x, edge.start.y);
    ctx.line_to(edge.end.x, edge.end.y);
    ctx.stroke();

    // Arrowhead scales with the stroke so it stays proportional under zoom.
    let len = edge.start.distance(&edge.end);
    if len > 0.0 {
        let size = ARROW_LENGTH * edge.stroke_width / 1.5;
        let ux = (edge.end.x - edge.start.x) / len;
        let uy = (edge.end.y - edge.start.y) / len;
        let base = Point::new(edge.end.x - ux * size, edge.end.y - uy * size);
        ctx.set_fill_style_str(&color);
        ctx.begin_path();
        ctx.move_to(edge.end.x, edge.end.y);
        ctx.line_to(base.x - uy * size / 2.0, base.y + ux * size / 2.0);
        ctx.line_to(base.x + uy * size / 2.0, base.y - ux * size / 2.0);
        ctx.close_path();
        ctx.fill();
    }

    if let Some(label) = &edge.label {
        paint_label(ctx, label)?;
    }
    ctx.set_global_alpha(1.0);
    Ok(())
}

fn paint_node(ctx: &CanvasRenderingContext2d, node: &SceneNode) -> Result<(), JsValue> {
    let stroke = node.stroke.to_string();
    ctx.set_global_alpha(node.opacity);

    if let Some(ring) = node.ring_radius {
        ctx.set_global_alpha(node.opacity * 0.5);
        ctx.set_stroke_style_str(&stroke);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.arc(node.x, node.y, ring, 0.0, std::f64::consts::TAU)?;
        ctx.stroke();
        ctx.set_global_alpha(node.opacity);
    }

    ctx.set_fill_style_str(&node.fill.to_string());
    ctx.set_stroke_style_str(&stroke);
    ctx.set_line_width(node.stroke_width);
    ctx.begin_path();
    ctx.arc(node.x, node.y, node.radius, 0.0, std::f64::consts::TAU)?;
    ctx.fill();
    ctx.stroke();

    if let Some(label) = &node.label {
        paint_label(ctx, label)?;
    }
    ctx.set_global_alpha(1.0);
    Ok(())
}

fn paint_label(ctx: &CanvasRenderingContext2d, label: &SceneLabel) -> Result<(), JsValue> {
    ctx.set_font(&format!("{}px {}", label.font_size, FONT_FAMILY));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(&label.color.to_string());
    ctx.fill_text(&label.text, label.x, label.y)
}

fn paint_tooltip(ctx: &CanvasRenderingContext2d, tooltip: &Tooltip) -> Result<(), JsValue> {
    ctx.set_font(&format!("12px {FONT_FAMILY}"));
    let label_width = ctx.measure_text(&tooltip.label)?.width();
    ctx.set_font(&format!("10px {FONT_FAMILY}"));
    let category_width = ctx.measure_text(&tooltip.category)?.width();
    let width = label_width.max(category_width) + 24.0;

    ctx.set_fill_style_str(&tooltip.background.to_string());
    ctx.set_stroke_style_str(&tooltip.accent.to_string());
    ctx.set_line_width(1.0);
    ctx.fill_rect(tooltip.x, tooltip.y, width, 44.0);
    ctx.stroke_rect(tooltip.x, tooltip.y, width, 44.0);

    ctx.set_text_align("left");
    ctx.set_text_baseline("alphabetic");
    ctx.set_font(&format!("12px {FONT_FAMILY}"));
    ctx.set_fill_style_str(&tooltip.color.to_string());
    ctx.fill_text(&tooltip.label, tooltip.x + 12.0, tooltip.y + 18.0)?;
    ctx.set_font(&format!("10px {FONT_FAMILY}"));
    ctx.set_fill_style_str(&tooltip.accent.to_string());
    ctx.fill_text(&tooltip.category, tooltip.x + 12.0, tooltip.y + 34.0)
}
