//! Sorted-pair Merkle tree over leaf hashes.
//!
//! This module provides:
//! - `MerkleTree`: immutable tree built from a leaf set, with root and
//!   inclusion proof generation
//! - `MerkleProof` and the stateless `verify` / `verify_record` functions
//!
//! Layer 0 holds the deduplicated leaves in ascending byte order. Each level
//! pairs consecutive nodes left to right, pairing a trailing odd node with
//! itself, and hashes every pair as H(min || max).

mod proof;
mod tree;


pub use proof::{verify, verify_record, MerkleProof};
pub use tree::MerkleTree;
