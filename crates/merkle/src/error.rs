//! Errors surfaced by encoding, tree construction and proof generation.
//!
//! Verification never produces one of these; it answers with a boolean.

use thiserror::Error;

use crate::Hash;

/// Errors from the Merkle layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Cannot build a Merkle tree from zero leaves")]
    EmptyTree,
    #[error("Leaf 0x{} is not part of the tree", hex::encode(.0))]
    LeafNotFound(Hash),
}
