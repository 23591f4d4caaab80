//! Balance snapshots: the dataset a root is committed to.
//!
//! A snapshot is a JSON array of entries:
//!
//! ```json
//! [{ "address": "0xf39f...", "balance": "100000000000000000000" }]
//! ```
//!
//! Balances may be decimal strings or `0x`-prefixed hex.

use std::path::Path;

use airdrop_merkle::Record;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encoding::{parse_address, parse_balance, EncodingError};

/// Errors while loading a snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid entry {index}: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: EncodingError,
    },
}

/// Snapshot entry as it appears in JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub address: String,
    pub balance: String,
}

impl BalanceEntry {
    /// Validate the entry into a record.
    pub fn to_record(&self) -> Result<Record, EncodingError> {
        let address = parse_address(&self.address)?;
        let balance = parse_balance(&self.balance)?;
        Ok(Record::new(address, balance)?)
    }
}

impl From<&Record> for BalanceEntry {
    fn from(record: &Record) -> Self {
        Self {
            address: record.address().to_string(),
            balance: record.balance().to_string(),
        }
    }
}

/// A validated list of balance records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    records: Vec<Record>,
}

impl Snapshot {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parse and validate snapshot JSON.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        let entries: Vec<BalanceEntry> = serde_json::from_str(json)?;
        Self::from_entries(&entries)
    }

    /// Validate raw entries.
    pub fn from_entries(entries: &[BalanceEntry]) -> Result<Self, SnapshotError> {
        let records = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .to_record()
                    .map_err(|source| SnapshotError::InvalidEntry { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    /// Load a snapshot file.
    pub fn load_from_path(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), records = snapshot.len(), "loaded snapshot");
        Ok(snapshot)
    }

    /// Save the snapshot as pretty JSON.
    pub fn save_to_path(&self, path: &Path) -> Result<(), SnapshotError> {
        let entries: Vec<BalanceEntry> = self.records.iter().map(BalanceEntry::from).collect();
        std::fs::write(path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
