//! Error types for iavl_dot

use thiserror::Error;

/// Result type alias for iavl_dot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, proving or rendering a tree
#[derive(Error, Debug)]
pub enum Error {
    /// The output sink (or an input file) rejected an I/O operation
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Keys must be strictly ascending: {0}")]
    UnsortedKeys(String),

    #[error("Node hash has not been computed; call ensure_hashes first")]
    HashNotComputed,

    #[error("Invalid node: {0}")]
    InvalidNode(String),
}
