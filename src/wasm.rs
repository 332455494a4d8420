//! WASM bindings for the riskmap-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Inputs and outputs cross the boundary as JSON strings; failures come back
//! as `{"error": {"message": ...}}` instead of exceptions.

use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::graph::parse_graph;
use crate::layout::{layout_nodes, positioned_nodes, Point};
use crate::logging;
use crate::output::{ErrorInfo, SceneOutput};
use crate::render::{canvas, svg};
use crate::session::{Mode, ViewportSession};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

const SERIALIZE_FAILED: &str = r#"{"error":{"message":"serialization failed"}}"#;

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| SERIALIZE_FAILED.to_string())
}

fn error_json(message: String) -> String {
    to_json(&SceneOutput {
        scene: None,
        error: Some(ErrorInfo { message }),
    })
}

fn parse_mode(mode: &str) -> Mode {
    match mode {
        "full_screen" | "fullscreen" | "full-screen" => Mode::FullScreen,
        "compact" => Mode::Compact,
        other => {
            tracing::warn!(mode = other, "unknown mode, using compact");
            Mode::Compact
        }
    }
}

/// Install console logging at the given level ("trace" .. "error").
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    logging::init(level);
}

/// Lay out a graph payload without a session. Returns the nodes with their
/// positions as a JSON array.
#[wasm_bindgen]
pub fn layout_graph(input: &str, mode: &str) -> String {
    let graph = match parse_graph(input) {
        Ok(graph) => graph,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting graph payload");
            return error_json(e.to_string());
        }
    };
    let cfg = parse_mode(mode).layout_config();
    let positions = layout_nodes(&graph.nodes, &cfg);
    to_json(&positioned_nodes(&graph.nodes, &positions, &cfg))
}

/// A graph view bound to one canvas. Dropping it ends the session.
#[wasm_bindgen]
pub struct GraphView {
    session: ViewportSession,
}

#[wasm_bindgen]
impl GraphView {
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str) -> GraphView {
        GraphView {
            session: ViewportSession::new(parse_mode(mode)),
        }
    }

    /// Replace the graph from an analysis payload and return the new frame.
    /// On error the previous graph stays on screen.
    pub fn set_graph(&mut self, input: &str) -> String {
        match parse_graph(input) {
            Ok(graph) => {
                self.session.set_graph(Rc::new(graph));
                self.render()
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejecting graph payload");
                error_json(e.to_string())
            }
        }
    }

    /// Override render settings with a JSON object of fields.
    pub fn set_render_config(&mut self, overrides: &str) -> String {
        match self.session.render_config().with_overrides(overrides) {
            Ok(config) => {
                self.session.set_render_config(config);
                self.render()
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejecting render config");
                error_json(e.to_string())
            }
        }
    }

    /// Wheel zoom. The caller should `preventDefault()` the wheel event.
    pub fn wheel(&mut self, delta_y: f64, x: f64, y: f64) {
        self.session.on_wheel(delta_y, Some(Point::new(x, y)));
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.session.on_pointer_down(Point::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.session.on_pointer_move(Point::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.session.on_pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.session.on_pointer_leave_canvas();
    }

    pub fn node_enter(&mut self, id: &str) {
        self.session.on_node_enter(id);
    }

    pub fn node_leave(&mut self, id: &str) {
        self.session.on_node_leave(id);
    }

    pub fn zoom_in(&mut self) {
        self.session.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.session.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.session.reset_view();
    }

    /// Id of the hovered node, if any.
    pub fn hovered(&self) -> Option<String> {
        self.session.hovered().map(str::to_owned)
    }

    /// Current frame as JSON.
    pub fn render(&mut self) -> String {
        let scene = self.session.render();
        to_json(&SceneOutput {
            scene: Some(scene),
            error: None,
        })
    }

    /// Current frame as a standalone SVG document.
    pub fn render_svg(&mut self) -> String {
        svg::to_svg(&self.session.render())
    }

    /// Paint the current frame onto `canvas`.
    pub fn paint(&mut self, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
        let ctx = canvas::context_2d(canvas)?;
        canvas::paint(&ctx, &self.session.render())
    }
}
