//! Canonical leaf encoding for `(address, balance)` records.
//!
//! A leaf is `keccak256(abi.encode(address, uint256))`: the address
//! left-padded to a 32-byte word followed by the balance as a 32-byte
//! big-endian word. Both fields are fixed width, so no delimiters or length
//! prefixes are needed and the encoding is injective.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;

use crate::error::MerkleError;
use crate::keccak::keccak256;
use crate::Hash;

/// Address length in bytes
pub const ADDRESS_LEN: usize = 20;

/// ABI word size in bytes
pub const WORD_LEN: usize = 32;

/// Encoded record length (two ABI words)
pub const ENCODED_LEN: usize = 2 * WORD_LEN;

/// Largest supported balance bit length (uint256)
pub const MAX_BALANCE_BITS: u64 = 256;

/// A 20-byte account identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Wrap raw address bytes.
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Build an address from a slice, rejecting anything but 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MerkleError> {
        let arr: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            MerkleError::InvalidInput(format!(
                "address must be {} bytes, got {}",
                ADDRESS_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = MerkleError;

    /// Parse a hex address, with or without the `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| MerkleError::InvalidInput(format!("invalid address hex: {}", e)))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

/// One dataset entry: an address and the balance it is entitled to.
///
/// The balance is bounded to 256 bits at construction, so a `Record` always
/// encodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Record {
    address: Address,
    balance: BigUint,
}

impl Record {
    /// Create a record, failing if the balance does not fit in a uint256.
    pub fn new(address: Address, balance: BigUint) -> Result<Self, MerkleError> {
        check_balance(&balance)?;
        Ok(Self { address, balance })
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn balance(&self) -> &BigUint {
        &self.balance
    }

    /// ABI-encode this record.
    pub fn encode(&self) -> [u8; ENCODED_LEN] {
        let mut out = [0u8; ENCODED_LEN];
        out[WORD_LEN - ADDRESS_LEN..WORD_LEN].copy_from_slice(self.address.as_bytes());

        // check_balance guarantees at most 32 bytes here
        let balance = self.balance.to_bytes_be();
        out[ENCODED_LEN - balance.len()..].copy_from_slice(&balance);
        out
    }

    /// Hash the encoded record into its leaf value.
    pub fn leaf_hash(&self) -> Hash {
        keccak256(&self.encode())
    }
}

fn check_balance(balance: &BigUint) -> Result<(), MerkleError> {
    if balance.bits() > MAX_BALANCE_BITS {
        return Err(MerkleError::InvalidInput(format!(
            "balance needs {} bits, max is {}",
            balance.bits(),
            MAX_BALANCE_BITS
        )));
    }
    Ok(())
}

/// Encode a record as `abi.encode(address, uint256)`.
pub fn encode(record: &Record) -> [u8; ENCODED_LEN] {
    record.encode()
}

/// Leaf value of a record.
pub fn leaf_hash(record: &Record) -> Hash {
    record.leaf_hash()
}

/// Encode unvalidated fields, enforcing the address length and balance range.
pub fn encode_raw(address: &[u8], balance: &BigUint) -> Result<[u8; ENCODED_LEN], MerkleError> {
    let address = Address::from_slice(address)?;
    Ok(Record::new(address, balance.clone())?.encode())
}

/// Leaf value of unvalidated fields.
pub fn leaf_hash_raw(address: &[u8], balance: &BigUint) -> Result<Hash, MerkleError> {
    encode_raw(address, balance).map(|encoded| keccak256(&encoded))
}
