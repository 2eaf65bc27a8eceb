//! Core data model types for iavl_dot

mod hash;

pub use hash::Hash;
