//! Scene types for frontend consumption.
//!
//! A `Scene` is everything needed to draw one frame. It is serialized to JSON
//! and handed to the frontend, or painted directly by `render::svg` /
//! `render::canvas`. Coordinates are in scene space unless noted; the painter
//! applies `transform` to everything except the tooltip.

use serde::Serialize;

use crate::layout::Point;
use crate::style::Color;
use crate::viewport::ViewportState;

/// A text run anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub id: String,
    /// Category tag, e.g. "risk".
    pub category: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
    pub opacity: f64,
    pub hovered: bool,
    /// Decorative outer ring, only while hovered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring_radius: Option<f64>,
    /// Omitted below the node label zoom threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<SceneLabel>,
}

impl SceneNode {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// An edge between two positioned nodes, clipped to their rims.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneEdge {
    pub from: String,
    pub to: String,
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub stroke_width: f64,
    pub opacity: f64,
    /// Touches the hovered node.
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<SceneLabel>,
}

/// Hover panel, in screen space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub label: String,
    pub category: String,
    pub x: f64,
    pub y: f64,
    pub background: Color,
    pub color: Color,
    pub accent: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: String,
    pub color: Color,
}

/// One frame, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub transform: ViewportState,
    /// Rounded zoom level for the toolbar; full-screen only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_percent: Option<u32>,
    pub edges: Vec<SceneEdge>,
    pub nodes: Vec<SceneNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legend: Vec<LegendEntry>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.iter().rev().find(|n| n.id == id)
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&SceneEdge> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }
}

/// Error information for the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

/// Response envelope for calls across the wasm boundary.
#[derive(Debug, Clone, Serialize)]
pub struct SceneOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}
