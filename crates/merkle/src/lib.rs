//! Merkle commitments for airdrop and allowlist datasets.
//!
//! This crate provides:
//! - `keccak`: Keccak-256 and the sorted-pair node hash
//! - `leaf`: canonical `(address, balance)` encoding and leaf hashing
//! - `tree`: tree construction, inclusion proofs and stateless verification
//!
//! Every choice that a verifier must reproduce bit-for-bit is fixed here:
//! Keccak-256, ABI-encoded leaves hashed once, ascending byte-sorted leaves,
//! sorted-pair concatenation and duplication of the last node on odd levels.

pub mod error;
pub mod keccak;
pub mod leaf;
pub mod tree;


pub use error::MerkleError;
pub use keccak::{hash_pair, keccak256, keccak256_many};
pub use leaf::{encode, encode_raw, leaf_hash, leaf_hash_raw, Address, Record};
pub use tree::{verify, verify_record, MerkleProof, MerkleTree};

/// A 32-byte Keccak-256 digest: leaves, inner nodes and roots alike.
pub type Hash = [u8; 32];
