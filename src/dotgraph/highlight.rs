//! Which nodes are referenced by the supplied paths

use crate::model::Hash;
use crate::tree::PathToLeaf;
use std::collections::HashSet;

/// Every left/right hash referenced by any step of any path
#[derive(Clone, Debug, Default)]
pub struct PathIndex {
    referenced: HashSet<Hash>,
}

impl PathIndex {
    pub fn new(paths: &[PathToLeaf]) -> Self {
        let referenced = paths
            .iter()
            .flat_map(PathToLeaf::steps)
            .flat_map(|step| [step.left, step.right])
            .flatten()
            .collect();
        PathIndex { referenced }
    }

    /// A node without a hash is never highlighted
    pub fn is_highlighted(&self, hash: Option<Hash>) -> bool {
        hash.is_some_and(|h| self.referenced.contains(&h))
    }

    /// Number of distinct referenced hashes
    pub fn len(&self) -> usize {
        self.referenced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.referenced.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ProofInnerNode;

    fn step(left: Option<Hash>, right: Option<Hash>) -> ProofInnerNode {
        ProofInnerNode {
            left,
            right,
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_left_and_right_across_paths() {
        let a = Hash::digest(b"a");
        let b = Hash::digest(b"b");
        let c = Hash::digest(b"c");
        let paths = vec![
            PathToLeaf::new(vec![step(Some(a), None)]),
            PathToLeaf::new(vec![step(None, None), step(None, Some(b))]),
        ];
        let index = PathIndex::new(&paths);

        assert!(index.is_highlighted(Some(a)));
        assert!(index.is_highlighted(Some(b)));
        assert!(!index.is_highlighted(Some(c)));
        assert!(!index.is_highlighted(None));
    }

    #[test]
    fn test_duplicate_references_collapse() {
        let a = Hash::digest(b"a");
        let path = PathToLeaf::new(vec![step(Some(a), Some(a))]);
        let index = PathIndex::new(&[path.clone(), path]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_no_paths() {
        let index = PathIndex::new(&[]);
        assert!(index.is_empty());
        assert!(!index.is_highlighted(Some(Hash::digest(b"x"))));
    }
}
