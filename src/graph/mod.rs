//! Graph input model.
//!
//! The graph is produced by the external analysis pipeline and handed to the
//! engine as-is. Nothing in the engine mutates it.

mod decode;
mod types;

pub use decode::{parse_graph, GraphError};
pub use types::*;
