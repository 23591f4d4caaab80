//! Keccak-256 hashing for leaves and tree nodes.
//!
//! This is the Ethereum flavour of Keccak (pre-standard padding), not NIST SHA3-256,
//! so digests match `keccak256` in Solidity and ethers.

mod native;


pub use native::{hash_pair, keccak256, keccak256_many};
