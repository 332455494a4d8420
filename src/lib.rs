pub mod graph;
pub mod interaction;
pub mod layout;
pub mod logging;
pub mod output;
pub mod render;
pub mod session;
pub mod style;
pub mod viewport;
mod wasm;

pub use graph::{parse_graph, Graph, GraphEdge, GraphError, GraphNode, NodeCategory};
pub use interaction::InteractionState;
pub use layout::{layout_nodes, LayoutCache, LayoutConfig, Point, PositionMap, PositionedNode};
pub use output::{Scene, SceneEdge, SceneLabel, SceneNode, Tooltip};
pub use render::{FrameInput, RenderConfig, RenderPipeline};
pub use session::{Mode, ViewportSession};
pub use style::{Color, ColorPolicy, GraphPalette};
pub use viewport::{ViewportConfig, ViewportController, ViewportState};
pub use wasm::{init_logging, layout_graph, GraphView};
