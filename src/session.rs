//! One rendering session: a graph shown in one presentation mode.
//!
//! The session owns its camera and hover state; nothing is shared between
//! sessions. Input handlers mutate state synchronously and the host calls
//! `render` afterwards to get the next frame.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::interaction::InteractionState;
use crate::layout::{LayoutCache, LayoutConfig, Point};
use crate::output::Scene;
use crate::render::{FrameInput, RenderConfig, RenderPipeline};
use crate::style::ColorPolicy;
use crate::viewport::{ViewportConfig, ViewportController, ViewportState};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Inline preview with a fixed camera.
    Compact,
    /// Pannable, zoomable view.
    FullScreen,
}

impl Mode {
    pub fn layout_config(self) -> LayoutConfig {
        match self {
            Mode::Compact => LayoutConfig::compact(),
            Mode::FullScreen => LayoutConfig::full_screen(),
        }
    }

    pub fn render_config(self) -> RenderConfig {
        match self {
            Mode::Compact => RenderConfig::compact(),
            Mode::FullScreen => RenderConfig::full_screen(),
        }
    }

    pub fn has_viewport(self) -> bool {
        matches!(self, Mode::FullScreen)
    }
}

#[derive(Debug)]
pub struct ViewportSession {
    mode: Mode,
    graph: Rc<Graph>,
    layout: LayoutCache,
    pipeline: RenderPipeline,
    viewport: Option<ViewportController>,
    interaction: InteractionState,
}

impl ViewportSession {
    pub fn new(mode: Mode) -> Self {
        Self::with_config(mode, mode.render_config(), ViewportConfig::default())
    }

    pub fn with_config(mode: Mode, render: RenderConfig, viewport: ViewportConfig) -> Self {
        tracing::info!(?mode, "session created");
        Self {
            mode,
            graph: Rc::new(Graph::default()),
            layout: LayoutCache::new(mode.layout_config()),
            pipeline: RenderPipeline::new(render, ColorPolicy::default()),
            viewport: mode.has_viewport().then(|| ViewportController::new(viewport)),
            interaction: InteractionState::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn graph(&self) -> &Rc<Graph> {
        &self.graph
    }

    /// Show a different graph. Handing in the same `Rc` again is a no-op.
    pub fn set_graph(&mut self, graph: Rc<Graph>) {
        if Rc::ptr_eq(&self.graph, &graph) {
            return;
        }
        tracing::info!(nodes = graph.nodes.len(), edges = graph.edges.len(), "graph replaced");
        self.graph = graph;
        self.layout.refresh(&self.graph);

        let stale = self
            .interaction
            .hovered()
            .is_some_and(|id| !self.layout.cached().contains_key(id));
        if stale {
            self.interaction.clear();
        }
    }

    pub fn render_config(&self) -> &RenderConfig {
        self.pipeline.config()
    }

    pub fn set_render_config(&mut self, config: RenderConfig) {
        self.pipeline.set_config(config);
    }

    pub fn viewport_state(&self) -> Option<ViewportState> {
        self.viewport.as_ref().map(ViewportController::state)
    }

    pub fn is_dragging(&self) -> bool {
        self.viewport.as_ref().is_some_and(ViewportController::is_dragging)
    }

    pub fn hovered(&self) -> Option<&str> {
        self.interaction.hovered()
    }

    /// Number of layout passes this session has run.
    pub fn layout_computations(&self) -> usize {
        self.layout.computations()
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn on_wheel(&mut self, delta_y: f64, pointer: Option<Point>) {
        if let Some(viewport) = &mut self.viewport {
            viewport.on_wheel(delta_y, pointer);
        }
    }

    pub fn on_pointer_down(&mut self, pos: Point) {
        if let Some(viewport) = &mut self.viewport {
            viewport.on_pointer_down(pos);
        }
    }

    /// Pans while dragging. Otherwise updates the hover from what is under `pos`.
    pub fn on_pointer_move(&mut self, pos: Point) {
        if let Some(viewport) = &mut self.viewport {
            viewport.on_pointer_move(pos);
        }
        // A drag never changes the hover.
        if self.is_dragging() {
            return;
        }

        self.layout.refresh(&self.graph);
        let hit = self.pipeline.pick_node(&self.frame(), pos);
        let current = self.interaction.hovered().map(str::to_owned);
        if hit == current {
            return;
        }
        if let Some(old) = current {
            self.interaction.on_node_leave(&old);
        }
        if let Some(new) = hit {
            self.interaction.on_node_enter(&new);
        }
    }

    pub fn on_pointer_up(&mut self) {
        if let Some(viewport) = &mut self.viewport {
            viewport.on_pointer_up();
        }
    }

    /// The pointer left the canvas: stop dragging and drop the hover.
    pub fn on_pointer_leave_canvas(&mut self) {
        if let Some(viewport) = &mut self.viewport {
            viewport.on_pointer_leave_canvas();
        }
        self.interaction.clear();
    }

    /// Hover entry for hosts that deliver per-node events themselves.
    /// Ids without a position are ignored.
    pub fn on_node_enter(&mut self, id: &str) {
        self.layout.refresh(&self.graph);
        if self.layout.cached().contains_key(id) {
            self.interaction.on_node_enter(id);
        }
    }

    pub fn on_node_leave(&mut self, id: &str) {
        self.interaction.on_node_leave(id);
    }

    pub fn zoom_in(&mut self) {
        if let Some(viewport) = &mut self.viewport {
            viewport.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if let Some(viewport) = &mut self.viewport {
            viewport.zoom_out();
        }
    }

    pub fn reset_view(&mut self) {
        if let Some(viewport) = &mut self.viewport {
            viewport.reset_view();
        }
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    pub fn render(&mut self) -> Scene {
        self.layout.refresh(&self.graph);
        self.pipeline.render(&self.frame())
    }

    /// Frame over the cached layout; callers refresh the cache first.
    fn frame(&self) -> FrameInput<'_> {
        FrameInput {
            graph: self.graph.as_ref(),
            positions: self.layout.cached(),
            layout: self.layout.config(),
            interaction: &self.interaction,
            viewport: self.viewport_state(),
        }
    }
}

impl Drop for ViewportSession {
    fn drop(&mut self) {
        tracing::debug!(mode = ?self.mode, "session closed");
    }
}
