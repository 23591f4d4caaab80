//! Verification against a committed root.
//!
//! [`MerkleVerifier`] mirrors the minimal on-chain verifier: it holds only the
//! root and answers `verify_merkle_proof(address, proof, balance)` with a
//! boolean. Nothing here returns an error for a bad claim.

use airdrop_merkle::{verify_record, Address, Hash};
use num_bigint::BigUint;

use crate::encoding::{
    format_hash, parse_address, parse_balance, parse_hash, parse_hex_proof, EncodingError,
};

/// Holder of a committed root
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MerkleVerifier {
    root: Hash,
}

impl MerkleVerifier {
    pub fn new(root: Hash) -> Self {
        Self { root }
    }

    /// Create a verifier from a hex root. A malformed root is a configuration
    /// error, so this one does fail.
    pub fn from_hex(root: &str) -> Result<Self, EncodingError> {
        Ok(Self::new(parse_hash(root)?))
    }

    pub fn root(&self) -> Hash {
        self.root
    }

    pub fn root_hex(&self) -> String {
        format_hash(&self.root)
    }

    /// Check that `(address, balance)` is committed under this root.
    pub fn verify_merkle_proof(&self, address: &Address, proof: &[Hash], balance: &BigUint) -> bool {
        verify_claim(address.as_bytes(), balance, proof, &self.root)
    }

    /// Text variant: any malformed field makes the claim unproven.
    pub fn verify_hex<S: AsRef<str>>(&self, address: &str, proof: &[S], balance: &str) -> bool {
        let parsed = (|| -> Result<_, EncodingError> {
            let address = parse_address(address)?;
            let proof = parse_hex_proof(proof)?;
            let balance = parse_balance(balance)?;
            Ok((address, proof, balance))
        })();

        match parsed {
            Ok((address, proof, balance)) => self.verify_merkle_proof(&address, &proof, &balance),
            Err(e) => {
                tracing::debug!(error = %e, "rejecting malformed claim");
                false
            }
        }
    }
}

/// Re-derive the leaf for `(address, balance)` and check the proof against `root`.
pub fn verify_claim(address: &[u8], balance: &BigUint, proof: &[Hash], root: &Hash) -> bool {
    verify_record(address, balance, proof, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prove::Allowlist;
    use airdrop_merkle::Record;

    fn allowlist() -> Allowlist {
        let records: Vec<Record> = (1..=5u8)
            .map(|i| Record::new(Address::new([i; 20]), BigUint::from(i as u64 * 7)).unwrap())
            .collect();
        Allowlist::new(&records).unwrap()
    }

    #[test]
    fn test_verify_listed_claim() {
        let allowlist = allowlist();
        let verifier = MerkleVerifier::new(allowlist.root());
        let claim = allowlist.prove_address(&Address::new([4; 20])).unwrap();

        assert!(verifier.verify_merkle_proof(&claim.address, claim.proof.siblings(), &claim.balance));
    }

    #[test]
    fn test_verify_wrong_balance_fails() {
        let allowlist = allowlist();
        let verifier = MerkleVerifier::new(allowlist.root());
        let claim = allowlist.prove_address(&Address::new([4; 20])).unwrap();

        let inflated = &claim.balance + 1u32;
        assert!(!verifier.verify_merkle_proof(&claim.address, claim.proof.siblings(), &inflated));
    }

    #[test]
    fn test_verify_with_other_root_fails() {
        let allowlist = allowlist();
        let claim = allowlist.prove_address(&Address::new([1; 20])).unwrap();
        let verifier = MerkleVerifier::new([0u8; 32]);

        assert!(!verifier.verify_merkle_proof(&claim.address, claim.proof.siblings(), &claim.balance));
    }

    #[test]
    fn test_verify_hex_round_trip() {
        let allowlist = allowlist();
        let verifier = MerkleVerifier::from_hex(&allowlist.root_hex()).unwrap();
        let json = allowlist.prove_address(&Address::new([2; 20])).unwrap().to_json();

        assert!(verifier.verify_hex(&json.address, &json.proof, &json.balance));
    }

    #[test]
    fn test_verify_hex_malformed_is_false() {
        let allowlist = allowlist();
        let verifier = MerkleVerifier::new(allowlist.root());
        let json = allowlist.prove_address(&Address::new([2; 20])).unwrap().to_json();

        assert!(!verifier.verify_hex("0x1234", &json.proof, &json.balance));
        assert!(!verifier.verify_hex(&json.address, &["0xzz"], &json.balance));
        assert!(!verifier.verify_hex(&json.address, &json.proof, "not a number"));
    }

    #[test]
    fn test_verifier_rejects_bad_root_hex() {
        assert!(MerkleVerifier::from_hex("0xabc").is_err());
    }
}
