//! Tree node types

use crate::model::Hash;
use crate::Result;
use serde::Serialize;
use std::cell::OnceCell;

/// Handle to a node stored in an [`ImmutableTree`](super::ImmutableTree) arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its arena
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A vertex of the tree
///
/// Leaves (height 0) carry a key and a value. Inner nodes carry the
/// smallest key of their right subtree and reference up to two children.
/// The content hash is computed lazily and cached once.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) key: Vec<u8>,
    pub(crate) value: Option<Vec<u8>>,
    pub(crate) version: i64,
    pub(crate) height: i8,
    pub(crate) size: i64,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) hash: OnceCell<Hash>,
}

/// Bytes fed to the hasher for a single node
#[derive(Serialize)]
struct HashPreimage<'a> {
    height: i8,
    size: i64,
    version: i64,
    body: PreimageBody<'a>,
}

#[derive(Serialize)]
enum PreimageBody<'a> {
    Leaf { key: &'a [u8], value: Hash },
    Inner { left: Option<Hash>, right: Option<Hash> },
}

impl Node {
    pub(crate) fn leaf(key: Vec<u8>, value: Vec<u8>, version: i64) -> Self {
        Node {
            key,
            value: Some(value),
            version,
            height: 0,
            size: 1,
            left: None,
            right: None,
            hash: OnceCell::new(),
        }
    }

    pub(crate) fn inner(
        key: Vec<u8>,
        version: i64,
        height: i8,
        size: i64,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> Self {
        Node {
            key,
            value: None,
            version,
            height,
            size,
            left,
            right,
            hash: OnceCell::new(),
        }
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The value, present only on leaves
    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    /// Tree version at which this node was created
    pub fn version(&self) -> i64 {
        self.version
    }

    /// 0 for leaves
    pub fn height(&self) -> i8 {
        self.height
    }

    /// Number of leaves in this subtree
    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn is_leaf(&self) -> bool {
        self.height == 0
    }

    /// The cached content hash, `None` until the tree's hashes are ensured
    pub fn hash(&self) -> Option<Hash> {
        self.hash.get().copied()
    }

    /// Compute this node's hash from its own fields and its children's hashes
    pub(crate) fn compute_hash(&self, left: Option<Hash>, right: Option<Hash>) -> Result<Hash> {
        let body = match &self.value {
            Some(value) if self.is_leaf() => PreimageBody::Leaf {
                key: &self.key,
                value: Hash::digest(value),
            },
            _ => PreimageBody::Inner { left, right },
        };
        let preimage = HashPreimage {
            height: self.height,
            size: self.size,
            version: self.version,
            body,
        };
        let data = bincode::serialize(&preimage)?;
        Ok(Hash::digest(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_hash_deterministic() {
        let node = Node::leaf(b"key".to_vec(), b"value".to_vec(), 1);
        let h1 = node.compute_hash(None, None).unwrap();
        let h2 = node.compute_hash(None, None).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_leaf_hash_covers_version_and_value() {
        let base = Node::leaf(b"key".to_vec(), b"value".to_vec(), 1);
        let newer = Node::leaf(b"key".to_vec(), b"value".to_vec(), 2);
        let changed = Node::leaf(b"key".to_vec(), b"other".to_vec(), 1);

        let h = base.compute_hash(None, None).unwrap();
        assert_ne!(h, newer.compute_hash(None, None).unwrap());
        assert_ne!(h, changed.compute_hash(None, None).unwrap());
    }

    #[test]
    fn test_inner_hash_depends_on_children() {
        let node = Node::inner(b"b".to_vec(), 1, 1, 2, Some(NodeId(0)), Some(NodeId(1)));
        let a = Hash::digest(b"a");
        let b = Hash::digest(b"b");
        assert_ne!(
            node.compute_hash(Some(a), Some(b)).unwrap(),
            node.compute_hash(Some(b), Some(a)).unwrap()
        );
    }

    #[test]
    fn test_hash_unset_until_cached() {
        let node = Node::leaf(b"k".to_vec(), b"v".to_vec(), 1);
        assert!(node.hash().is_none());
        let h = node.compute_hash(None, None).unwrap();
        node.hash.set(h).unwrap();
        assert_eq!(node.hash(), Some(h));
    }
}
