//! Node content hashes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of hex characters shown in a node label
const SHORT_LEN: usize = 7;

/// BLAKE3 digest of a node's hash preimage
///
/// The full lowercase hex form is a node's graph identity; the first
/// seven characters appear in its label.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash([u8; 32]);

impl Hash {
    pub fn digest(data: &[u8]) -> Self {
        Hash(*blake3::hash(data).as_bytes())
    }

    /// Lowercase hex of all 32 bytes
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Label form: the first seven hex characters
    pub fn short(&self) -> String {
        hex::encode(&self.0[..SHORT_LEN.div_ceil(2)])[..SHORT_LEN].to_string()
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.short())
    }
}
