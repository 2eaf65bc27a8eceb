//! Lookup/proof paths from the root toward a leaf

use super::immutable::ImmutableTree;
use super::node::NodeId;
use crate::model::Hash;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One step of a path
///
/// Exactly one of `left`/`right` is normally set: the hash of the sibling
/// subtree that the path did not descend into.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofInnerNode {
    pub height: i8,
    pub size: i64,
    pub version: i64,
    pub left: Option<Hash>,
    pub right: Option<Hash>,
}

/// Ordered steps from the root toward a target leaf
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathToLeaf(Vec<ProofInnerNode>);

impl PathToLeaf {
    pub fn new(steps: Vec<ProofInnerNode>) -> Self {
        PathToLeaf(steps)
    }

    pub fn steps(&self) -> &[ProofInnerNode] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ImmutableTree {
    /// Build the lookup path to the leaf holding `key`
    ///
    /// Hashes must have been ensured beforehand.
    pub fn path_to_leaf(&self, key: &[u8]) -> Result<PathToLeaf> {
        let not_found = || Error::KeyNotFound(String::from_utf8_lossy(key).into_owned());

        let mut steps = Vec::new();
        let mut node = self.root().ok_or_else(not_found)?;
        while !node.is_leaf() {
            let mut step = ProofInnerNode {
                height: node.height(),
                size: node.size(),
                version: node.version(),
                left: None,
                right: None,
            };
            let next = if key < node.key() {
                step.right = self.child_hash(node.right())?;
                node.left()
            } else {
                step.left = self.child_hash(node.left())?;
                node.right()
            };
            steps.push(step);
            node = next
                .and_then(|id| self.node(id))
                .ok_or_else(not_found)?;
        }

        if node.key() != key {
            return Err(not_found());
        }
        Ok(PathToLeaf(steps))
    }

    fn child_hash(&self, child: Option<NodeId>) -> Result<Option<Hash>> {
        match child.and_then(|id| self.node(id)) {
            Some(node) => node.hash().map(Some).ok_or(Error::HashNotComputed),
            None => Ok(None),
        }
    }
}
