//! Pan/zoom camera for the full-screen view.
//!
//! Screen coordinates relate to scene coordinates by
//! `screen = scene * scale + offset`. Every mutation re-clamps `scale`.

use serde::{Deserialize, Serialize};

use crate::layout::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Scale change per unit of wheel `deltaY`.
    pub wheel_sensitivity: f64,
    /// Scale change per zoom button press.
    pub button_step: f64,
    /// Keep the scene point under the cursor fixed while wheel-zooming.
    pub anchor_zoom_at_pointer: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.2,
            max_scale: 4.0,
            wheel_sensitivity: 0.001,
            button_step: 0.2,
            anchor_zoom_at_pointer: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ViewportState {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl ViewportState {
    pub const IDENTITY: ViewportState = ViewportState {
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    pub fn to_scene(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    pub fn to_screen(&self, scene: Point) -> Point {
        Point {
            x: scene.x * self.scale + self.offset_x,
            y: scene.y * self.scale + self.offset_y,
        }
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    config: ViewportConfig,
    state: ViewportState,
    is_dragging: bool,
    last_pointer: Point,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            state: ViewportState::IDENTITY,
            is_dragging: false,
            last_pointer: Point::default(),
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Wheel zoom. Positive `delta_y` (scrolling down) zooms out.
    ///
    /// The host is expected to suppress the page's default scroll for this event.
    pub fn on_wheel(&mut self, delta_y: f64, pointer: Option<Point>) {
        if !delta_y.is_finite() {
            return;
        }
        let target = self.state.scale - delta_y * self.config.wheel_sensitivity;
        match pointer {
            Some(p) if self.config.anchor_zoom_at_pointer => self.zoom_about(p, target),
            _ => self.set_scale(target),
        }
    }

    pub fn on_pointer_down(&mut self, pos: Point) {
        self.is_dragging = true;
        self.last_pointer = pos;
    }

    pub fn on_pointer_move(&mut self, pos: Point) {
        if !self.is_dragging {
            return;
        }
        self.state.offset_x += pos.x - self.last_pointer.x;
        self.state.offset_y += pos.y - self.last_pointer.y;
        self.last_pointer = pos;
    }

    pub fn on_pointer_up(&mut self) {
        self.is_dragging = false;
    }

    pub fn on_pointer_leave_canvas(&mut self) {
        self.is_dragging = false;
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.state.scale + self.config.button_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.state.scale - self.config.button_step);
    }

    pub fn reset_view(&mut self) {
        self.state = ViewportState::IDENTITY;
        tracing::info!("viewport reset");
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        let clamped = scale.clamp(self.config.min_scale, self.config.max_scale);
        if clamped != scale {
            tracing::debug!(requested = scale, clamped, "zoom clamped");
        }
        clamped
    }

    fn set_scale(&mut self, scale: f64) {
        self.state.scale = self.clamp_scale(scale);
    }

    fn zoom_about(&mut self, anchor: Point, scale: f64) {
        let scene = self.state.to_scene(anchor);
        self.set_scale(scale);
        self.state.offset_x = anchor.x - scene.x * self.state.scale;
        self.state.offset_y = anchor.y - scene.y * self.state.scale;
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}
