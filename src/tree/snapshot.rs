//! JSON description of a tree snapshot

use super::immutable::ImmutableTree;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A single key/value pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// Serialized form of a snapshot: a version and its entries in any order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSpec {
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl SnapshotSpec {
    /// Parse a snapshot description from JSON
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Sort the entries and build a balanced tree
    pub fn into_tree(mut self) -> Result<ImmutableTree> {
        self.entries.sort_by(|a, b| a.key.cmp(&b.key));
        ImmutableTree::from_sorted(
            self.version,
            self.entries.into_iter().map(|e| (e.key, e.value)),
        )
    }
}
