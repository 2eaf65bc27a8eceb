//! Immutable, versioned tree snapshot backed by a node arena

use super::node::{Node, NodeId};
use crate::model::Hash;
use crate::{Error, Result};
use std::collections::HashSet;
use tracing::debug;

/// A read-only view of the tree at a fixed version
///
/// Nodes live in an arena and reference their children by [`NodeId`].
/// A child is always pushed before its parent and has at most one parent,
/// so every reachable node is visited exactly once by a traversal.
#[derive(Clone, Debug)]
pub struct ImmutableTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    version: i64,
    /// Nodes already attached under an inner node
    parented: HashSet<NodeId>,
}

impl ImmutableTree {
    /// Create an empty snapshot
    pub fn new(version: i64) -> Self {
        ImmutableTree {
            nodes: Vec::new(),
            root: None,
            version,
            parented: HashSet::new(),
        }
    }

    /// Build a height-balanced tree from entries sorted by key
    ///
    /// Every node is stamped with `version`. Keys must be strictly ascending.
    pub fn from_sorted<K, V>(version: i64, entries: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
    {
        let entries: Vec<(Vec<u8>, Vec<u8>)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        for pair in entries.windows(2) {
            if pair[0].0 >= pair[1].0 {
                return Err(Error::UnsortedKeys(format!(
                    "{:?} is not before {:?}",
                    String::from_utf8_lossy(&pair[0].0),
                    String::from_utf8_lossy(&pair[1].0)
                )));
            }
        }

        let mut tree = ImmutableTree::new(version);
        if !entries.is_empty() {
            let root = tree.build_balanced(&entries, version)?;
            tree.root = Some(root);
        }
        Ok(tree)
    }

    /// Add a leaf to the arena (not attached to the root)
    pub fn push_leaf(
        &mut self,
        key: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
        version: i64,
    ) -> NodeId {
        self.push(Node::leaf(key.into(), value.into(), version))
    }

    /// Add an inner node over already-pushed children
    ///
    /// Height and size are derived from the children. Either child may be
    /// absent, which only happens in incomplete snapshots. A child may not
    /// already belong to another inner node, and the height must fit in `i8`.
    pub fn push_inner(
        &mut self,
        key: impl Into<Vec<u8>>,
        version: i64,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> Result<NodeId> {
        if left.is_some() && left == right {
            return Err(Error::InvalidNode(
                "left and right children are the same node".into(),
            ));
        }

        let mut height = 0;
        let mut size = 0;
        for child in [left, right].into_iter().flatten() {
            let node = self.checked(child)?;
            if self.parented.contains(&child) {
                return Err(Error::InvalidNode(format!(
                    "node {} already has a parent",
                    child.0
                )));
            }
            height = height.max(node.height);
            size += node.size;
        }
        let height = height
            .checked_add(1)
            .ok_or_else(|| Error::InvalidNode(format!("height exceeds {}", i8::MAX)))?;

        self.parented.extend([left, right].into_iter().flatten());
        let node = Node::inner(key.into(), version, height, size, left, right);
        Ok(self.push(node))
    }

    /// Point the snapshot at a root node (or make it empty)
    pub fn set_root(&mut self, root: Option<NodeId>) -> Result<()> {
        if let Some(id) = root {
            self.checked(id)?;
        }
        self.root = root;
        Ok(())
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.map(|id| &self.nodes[id.0])
    }

    /// Look up a node by handle
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of leaves reachable from the root
    pub fn len(&self) -> usize {
        self.root().map_or(0, |root| root.size as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Root hash, once hashes have been ensured
    pub fn root_hash(&self) -> Option<Hash> {
        self.root().and_then(Node::hash)
    }

    /// Get the value stored under `key`
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        let mut node = self.root()?;
        loop {
            if node.is_leaf() {
                return (node.key == key).then(|| node.value()).flatten();
            }
            let next = if key < node.key.as_slice() {
                node.left
            } else {
                node.right
            };
            node = &self.nodes[next?.0];
        }
    }

    /// Compute and cache the hash of every node reachable from the root
    ///
    /// Children are hashed before their parents. Already cached hashes are
    /// kept. Returns the number of hashes computed by this call.
    pub fn ensure_hashes(&self) -> Result<usize> {
        let computed = match self.root {
            Some(root) => self.hash_with_count(root)?.1,
            None => 0,
        };
        debug!(version = self.version, computed, "Ensured node hashes");
        Ok(computed)
    }

    /// Walk every reachable node in pre-order
    ///
    /// With `ascending` the left child is visited before the right one.
    /// The callback returns `true` to stop; the return value reports
    /// whether the walk was stopped early.
    pub fn traverse<F>(&self, ascending: bool, mut f: F) -> bool
    where
        F: FnMut(&Node) -> bool,
    {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if f(node) {
                return true;
            }
            let (first, second) = if ascending {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };
            stack.extend(second);
            stack.extend(first);
        }
        false
    }

    // === Internal helpers ===

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn checked(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or_else(|| {
            Error::InvalidNode(format!(
                "handle {} outside arena of {} nodes",
                id.0,
                self.nodes.len()
            ))
        })
    }

    fn hash_with_count(&self, id: NodeId) -> Result<(Hash, usize)> {
        let node = &self.nodes[id.0];
        if let Some(hash) = node.hash() {
            return Ok((hash, 0));
        }

        let mut count = 1;
        let mut child_hash = |child: Option<NodeId>| -> Result<Option<Hash>> {
            match child {
                Some(child) => {
                    let (hash, n) = self.hash_with_count(child)?;
                    count += n;
                    Ok(Some(hash))
                }
                None => Ok(None),
            }
        };
        let left = child_hash(node.left)?;
        let right = child_hash(node.right)?;

        let hash = node.compute_hash(left, right)?;
        let hash = *node.hash.get_or_init(|| hash);
        Ok((hash, count))
    }

    fn build_balanced(&mut self, entries: &[(Vec<u8>, Vec<u8>)], version: i64) -> Result<NodeId> {
        if let [(key, value)] = entries {
            return Ok(self.push_leaf(key.clone(), value.clone(), version));
        }
        let mid = entries.len().div_ceil(2);
        let (left_entries, right_entries) = entries.split_at(mid);
        let left = self.build_balanced(left_entries, version)?;
        let right = self.build_balanced(right_entries, version)?;
        let key = right_entries[0].0.clone();
        self.push_inner(key, version, Some(left), Some(right))
    }
}
