//! Graphviz DOT rendering of tree snapshots
//!
//! A snapshot is walked once in pre-order. Each node becomes a labelled
//! graph node and each child reference an edge; nodes referenced by a
//! supplied proof path are drawn highlighted.

mod highlight;
mod model;
mod render;

pub use highlight::PathIndex;
pub use model::{GraphContext, GraphEdge, GraphNode};
pub use render::write_dot_graph;
