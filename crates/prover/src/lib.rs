//! Allowlist proof generation and verification.
//!
//! This crate provides utilities for:
//! - Loading balance snapshots
//! - Committing a snapshot to a Merkle root and generating claim proofs
//! - Verifying claims against a committed root, as an on-chain verifier would

pub mod encoding;
pub mod prove;
pub mod snapshot;
pub mod verify;

pub use encoding::{format_hash, parse_address, parse_balance, parse_hash, parse_hex_proof, EncodingError};
pub use prove::{Allowlist, ClaimProof, ClaimProofJson, ProveError};
pub use snapshot::{BalanceEntry, Snapshot, SnapshotError};
pub use verify::{verify_claim, MerkleVerifier};

pub use airdrop_merkle::{Address, Hash, Record};
