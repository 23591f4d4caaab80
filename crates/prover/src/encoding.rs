//! Hex and decimal text forms used at the JSON boundary.

use std::str::FromStr;

use airdrop_merkle::{Address, Hash, MerkleError};
use num_bigint::BigUint;
use num_traits::Num;
use thiserror::Error;

/// Errors while parsing hashes, addresses or balances from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
    #[error("Hash must be 32 bytes, got {0}")]
    HashLength(usize),
    #[error("Invalid balance: {0}")]
    InvalidBalance(String),
    #[error(transparent)]
    Merkle(#[from] MerkleError),
}

fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

/// Parse a 32-byte hash from hex, with or without `0x`.
pub fn parse_hash(s: &str) -> Result<Hash, EncodingError> {
    let bytes = hex::decode(strip_0x(s)).map_err(|e| EncodingError::InvalidHex(e.to_string()))?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| EncodingError::HashLength(len))
}

/// Format a hash as `0x`-prefixed lowercase hex.
pub fn format_hash(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Parse a list of hex sibling hashes.
pub fn parse_hex_proof<S: AsRef<str>>(proof: &[S]) -> Result<Vec<Hash>, EncodingError> {
    proof.iter().map(|s| parse_hash(s.as_ref())).collect()
}

/// Parse an address from hex.
pub fn parse_address(s: &str) -> Result<Address, EncodingError> {
    Ok(Address::from_str(s.trim())?)
}

/// Parse a balance given in decimal, or in hex with a `0x` prefix.
pub fn parse_balance(s: &str) -> Result<BigUint, EncodingError> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => BigUint::from_str_radix(digits, 16),
        None => BigUint::from_str_radix(s, 10),
    };
    parsed.map_err(|e| EncodingError::InvalidBalance(format!("{:?}: {}", s, e)))
}
