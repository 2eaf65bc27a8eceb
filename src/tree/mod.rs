//! Immutable IAVL-style tree snapshots
//!
//! This implements a versioned, height-balanced merkle tree where:
//! - Leaves hold key/value pairs; inner nodes route by key
//! - Each node's hash is derived from its own fields and its children's hashes
//! - Nodes are stored in an arena and referenced by handle

mod immutable;
mod node;
mod proof;
mod snapshot;

pub use immutable::ImmutableTree;
pub use node::{Node, NodeId};
pub use proof::{PathToLeaf, ProofInnerNode};
pub use snapshot::{Entry, SnapshotSpec};
