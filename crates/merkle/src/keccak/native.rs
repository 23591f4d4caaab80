//! Native Keccak-256 functions.

use tiny_keccak::{Hasher, Keccak};

use crate::Hash;

/// Hash a byte string.
pub fn keccak256(data: &[u8]) -> Hash {
    keccak256_many(&[data])
}

/// Hash the concatenation of several byte strings.
pub fn keccak256_many(parts: &[&[u8]]) -> Hash {
    let mut keccak = Keccak::v256();
    for part in parts {
        keccak.update(part);
    }
    let mut output = [0u8; 32];
    keccak.finalize(&mut output);
    output
}

/// Hash two nodes in ascending byte order: H(min(a, b) || max(a, b)).
///
/// Build, proof generation and verification all go through this function,
/// which is what lets a verifier ignore left/right positions entirely.
pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    if a <= b {
        keccak256_many(&[a.as_slice(), b.as_slice()])
    } else {
        keccak256_many(&[b.as_slice(), a.as_slice()])
    }
}
