//! Merkle inclusion proofs and stateless verification.
//!
//! Verification only needs the leaf, the sibling list and the committed root.
//! It never fails with an error: anything malformed or mismatched simply
//! recomputes to a different root and yields `false`.

use num_bigint::BigUint;

use crate::keccak::hash_pair;
use crate::leaf::leaf_hash_raw;
use crate::Hash;

/// A Merkle proof for one leaf.
///
/// Contains the sibling hashes from the leaf level up to just below the root.
/// No direction bits are stored: each step hashes the sorted pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MerkleProof {
    siblings: Vec<Hash>,
}

impl MerkleProof {
    /// Create a proof from an ordered sibling list.
    pub fn new(siblings: Vec<Hash>) -> Self {
        Self { siblings }
    }

    /// Get the sibling hashes, leaf level first.
    pub fn siblings(&self) -> &[Hash] {
        &self.siblings
    }

    pub fn into_siblings(self) -> Vec<Hash> {
        self.siblings
    }

    /// Number of levels covered by the proof.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Fold the siblings into a candidate root starting from `leaf`.
    pub fn compute_root(&self, leaf: &Hash) -> Hash {
        compute_root(leaf, &self.siblings)
    }

    /// Check that this proof links `leaf` to `root`.
    pub fn verify(&self, leaf: &Hash, root: &Hash) -> bool {
        verify(leaf, &self.siblings, root)
    }
}

impl From<Vec<Hash>> for MerkleProof {
    fn from(siblings: Vec<Hash>) -> Self {
        Self::new(siblings)
    }
}

fn compute_root(leaf: &Hash, proof: &[Hash]) -> Hash {
    proof
        .iter()
        .fold(*leaf, |current, sibling| hash_pair(&current, sibling))
}

/// Recompute the root from `leaf` and `proof` and compare it with `root`.
///
/// This is the function an external verifier (for example a contract) must
/// reproduce exactly.
pub fn verify(leaf: &Hash, proof: &[Hash], root: &Hash) -> bool {
    compute_root(leaf, proof) == *root
}

/// Verify a claimed `(address, balance)` pair against a committed root.
///
/// A wrong-length address or a balance above 256 bits cannot have been
/// committed, so it yields `false` instead of an error.
pub fn verify_record(address: &[u8], balance: &BigUint, proof: &[Hash], root: &Hash) -> bool {
    match leaf_hash_raw(address, balance) {
        Ok(leaf) => verify(&leaf, proof, root),
        Err(_) => false,
    }
}
