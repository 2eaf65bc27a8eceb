//! # iavl_dot
//!
//! Render immutable IAVL merkle trees as Graphviz DOT graphs.
//!
//! A tree snapshot is hashed, walked once in pre-order, and written out as a
//! `strict graph` whose nodes show each node's key, short hash, version and
//! value. Nodes referenced by proof paths are highlighted.
//!
//! ## Core Concepts
//!
//! - **Snapshots**: Arena-backed, read-only trees at a fixed version
//! - **Hashes**: BLAKE3 content hashes, computed once and cached per node
//! - **Paths**: Root-to-leaf lookup paths recording sibling hashes
//!
//! ## Example
//!
//! ```
//! use iavl_dot::{write_dot_graph, ImmutableTree};
//!
//! let tree = ImmutableTree::from_sorted(1, [("a", "1"), ("b", "2")])?;
//! tree.ensure_hashes()?;
//! let path = tree.path_to_leaf(b"b")?;
//!
//! let mut out = Vec::new();
//! write_dot_graph(&mut out, &tree, &[path])?;
//! assert!(String::from_utf8_lossy(&out).starts_with("strict graph {"));
//! # Ok::<(), iavl_dot::Error>(())
//! ```

pub mod dotgraph;
pub mod model;
pub mod tree;

mod error;

pub use dotgraph::{write_dot_graph, GraphContext, GraphEdge, GraphNode, PathIndex};
pub use error::{Error, Result};
pub use model::Hash;
pub use tree::{Entry, ImmutableTree, Node, NodeId, PathToLeaf, ProofInnerNode, SnapshotSpec};
