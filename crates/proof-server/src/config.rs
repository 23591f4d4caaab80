//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Snapshot path variable
pub const SNAPSHOT_ENV: &str = "AIRDROP_SNAPSHOT";
/// Listen address variable
pub const LISTEN_ENV: &str = "AIRDROP_LISTEN";

const DEFAULT_SNAPSHOT: &str = "snapshot.json";
const DEFAULT_LISTEN: &str = "0.0.0.0:3001";

/// Errors in server configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid AIRDROP_LISTEN value {value:?}: {source}")]
    InvalidListen {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub snapshot: PathBuf,
    pub listen: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let snapshot = lookup(SNAPSHOT_ENV).unwrap_or_else(|| DEFAULT_SNAPSHOT.to_string());
        let listen = lookup(LISTEN_ENV).unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen = listen
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidListen {
                value: listen.clone(),
                source,
            })?;

        Ok(Self {
            snapshot: PathBuf::from(snapshot),
            listen,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.snapshot, PathBuf::from("snapshot.json"));
        assert_eq!(config.listen, "0.0.0.0:3001".parse().unwrap());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (SNAPSHOT_ENV, "/data/drop.json"),
            (LISTEN_ENV, "127.0.0.1:8080"),
        ]))
        .unwrap();
        assert_eq!(config.snapshot, PathBuf::from("/data/drop.json"));
        assert_eq!(config.listen.port(), 8080);
    }

    #[test]
    fn test_invalid_listen() {
        let err = ServerConfig::from_lookup(lookup(&[(LISTEN_ENV, "nowhere")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidListen { .. }));
    }
}
