//! Proof generation over an allowlist snapshot.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use airdrop_merkle::{Address, Hash, MerkleError, MerkleProof, MerkleTree, Record};
use num_bigint::BigUint;
use serde::Serialize;
use thiserror::Error;

use crate::encoding::format_hash;
use crate::snapshot::Snapshot;

/// Errors during allowlist construction or proof generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProveError {
    #[error("Address {address} is listed with two balances: {first} and {second}")]
    ConflictingBalance {
        address: Address,
        first: BigUint,
        second: BigUint,
    },
    #[error("Address {0} is not on the allowlist")]
    NotListed(Address),
    #[error(transparent)]
    Merkle(#[from] MerkleError),
}

/// An inclusion proof for one claim, with everything a verifier needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimProof {
    pub address: Address,
    pub balance: BigUint,
    pub leaf: Hash,
    pub proof: MerkleProof,
    pub root: Hash,
}

impl ClaimProof {
    /// Sibling hashes as `0x`-prefixed hex, as embedded in a transaction payload.
    pub fn hex_proof(&self) -> Vec<String> {
        self.proof.siblings().iter().map(format_hash).collect()
    }

    /// Re-check the proof against its own root.
    pub fn verify(&self) -> bool {
        self.proof.verify(&self.leaf, &self.root)
    }

    pub fn to_json(&self) -> ClaimProofJson {
        ClaimProofJson {
            address: self.address.to_string(),
            balance: self.balance.to_string(),
            leaf: format_hash(&self.leaf),
            proof: self.hex_proof(),
            root: format_hash(&self.root),
        }
    }
}

/// JSON form of a [`ClaimProof`]
#[derive(Clone, Debug, Serialize)]
pub struct ClaimProofJson {
    pub address: String,
    pub balance: String,
    pub leaf: String,
    pub proof: Vec<String>,
    pub root: String,
}

/// A committed allowlist: the Merkle tree plus a balance index by address.
///
/// Built once; sharing it across threads needs no locking.
#[derive(Clone, Debug)]
pub struct Allowlist {
    tree: MerkleTree,
    balances: HashMap<Address, BigUint>,
}

impl Allowlist {
    /// Build the allowlist. Repeated identical records collapse; an address with
    /// two different balances is rejected.
    pub fn new(records: &[Record]) -> Result<Self, ProveError> {
        let mut balances: HashMap<Address, BigUint> = HashMap::with_capacity(records.len());
        for record in records {
            match balances.entry(*record.address()) {
                Entry::Occupied(listed) if listed.get() != record.balance() => {
                    return Err(ProveError::ConflictingBalance {
                        address: *record.address(),
                        first: listed.get().clone(),
                        second: record.balance().clone(),
                    });
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    slot.insert(record.balance().clone());
                }
            }
        }

        let tree = MerkleTree::from_records(records)?;
        tracing::info!(
            records = balances.len(),
            depth = tree.depth(),
            root = %format_hash(&tree.root()),
            "built allowlist tree"
        );

        Ok(Self { tree, balances })
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, ProveError> {
        Self::new(snapshot.records())
    }

    pub fn root(&self) -> Hash {
        self.tree.root()
    }

    pub fn root_hex(&self) -> String {
        format_hash(&self.tree.root())
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    pub fn balance_of(&self, address: &Address) -> Option<&BigUint> {
        self.balances.get(address)
    }

    /// Number of listed addresses.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Generate a proof for an explicit claim.
    pub fn prove(&self, address: Address, balance: BigUint) -> Result<ClaimProof, ProveError> {
        let record = Record::new(address, balance)?;
        let leaf = record.leaf_hash();
        let proof = self.tree.prove_inclusion(&leaf).map_err(|e| match e {
            MerkleError::LeafNotFound(_) => ProveError::NotListed(address),
            other => ProveError::Merkle(other),
        })?;

        tracing::debug!(%address, levels = proof.len(), "generated claim proof");

        let (address, balance) = (*record.address(), record.balance().clone());
        Ok(ClaimProof {
            address,
            balance,
            leaf,
            proof,
            root: self.tree.root(),
        })
    }

    /// Generate a proof for the balance listed under `address`.
    pub fn prove_address(&self, address: &Address) -> Result<ClaimProof, ProveError> {
        let balance = self
            .balance_of(address)
            .cloned()
            .ok_or(ProveError::NotListed(*address))?;
        self.prove(*address, balance)
    }
}
