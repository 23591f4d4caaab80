//! Tree construction and inclusion proof generation.

use crate::error::MerkleError;
use crate::keccak::hash_pair;
use crate::leaf::Record;
use crate::Hash;

use super::proof::MerkleProof;

/// Merkle tree storing every hashed level for proof generation.
///
/// `layers[0]` = sorted, deduplicated leaves; the last layer holds only the root.
/// There are no mutation methods: a changed dataset means a new tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a tree from leaf hashes. Input order and duplicates do not affect the result.
    pub fn new<I>(leaves: I) -> Result<Self, MerkleError>
    where
        I: IntoIterator<Item = Hash>,
    {
        let mut sorted: Vec<Hash> = leaves.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();

        if sorted.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        let mut layers = vec![sorted];
        loop {
            let current = &layers[layers.len() - 1];
            if current.len() == 1 {
                break;
            }
            let next = Self::next_layer(current);
            layers.push(next);
        }

        Ok(Self { layers })
    }

    /// Encode and hash every record, then build the tree.
    pub fn from_records(records: &[Record]) -> Result<Self, MerkleError> {
        #[cfg(feature = "parallel")]
        let leaves: Vec<Hash> = {
            use rayon::prelude::*;
            records.par_iter().map(Record::leaf_hash).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let leaves: Vec<Hash> = records.iter().map(Record::leaf_hash).collect();

        Self::new(leaves)
    }

    /// Hash one level into the next, duplicating a trailing odd node.
    fn next_layer(layer: &[Hash]) -> Vec<Hash> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            layer.par_chunks(2).map(Self::hash_chunk).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            layer.chunks(2).map(Self::hash_chunk).collect()
        }
    }

    fn hash_chunk(chunk: &[Hash]) -> Hash {
        let left = &chunk[0];
        let right = chunk.get(1).unwrap_or(left);
        hash_pair(left, right)
    }

    /// Get the root hash.
    pub fn root(&self) -> Hash {
        // new() rejects empty input, so the top layer always has one node
        self.layers[self.layers.len() - 1][0]
    }

    /// Get the sorted, deduplicated leaves.
    pub fn leaves(&self) -> &[Hash] {
        &self.layers[0]
    }

    /// Get all levels, leaves first.
    pub fn layers(&self) -> &[Vec<Hash>] {
        &self.layers
    }

    /// Number of distinct leaves.
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of hashing levels between a leaf and the root (the proof length).
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Check whether a leaf was committed.
    pub fn contains(&self, leaf: &Hash) -> bool {
        self.leaves().binary_search(leaf).is_ok()
    }

    /// Generate the sibling path from `leaf` up to the root.
    pub fn prove_inclusion(&self, leaf: &Hash) -> Result<MerkleProof, MerkleError> {
        let mut index = self
            .leaves()
            .binary_search(leaf)
            .map_err(|_| MerkleError::LeafNotFound(*leaf))?;

        let mut siblings = Vec::with_capacity(self.depth());
        for layer in &self.layers[..self.depth()] {
            let sibling = if index % 2 == 1 {
                layer[index - 1]
            } else {
                // Trailing odd node is its own sibling
                layer.get(index + 1).copied().unwrap_or(layer[index])
            };
            siblings.push(sibling);
            index /= 2;
        }

        Ok(MerkleProof::new(siblings))
    }

    /// Generate a proof for a record.
    pub fn prove_record(&self, record: &Record) -> Result<MerkleProof, MerkleError> {
        self.prove_inclusion(&record.leaf_hash())
    }
}
