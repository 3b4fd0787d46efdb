//! Error types for gapnode

use crate::chainparams::NetworkId;
use crate::hash::Hash256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("{network} genesis hash mismatch: expected {expected}, computed {computed}")]
    GenesisHashMismatch {
        network: NetworkId,
        expected: Hash256,
        computed: Hash256,
    },
    #[error("{network} genesis merkle root mismatch: expected {expected}, computed {computed}")]
    GenesisMerkleMismatch {
        network: NetworkId,
        expected: Hash256,
        computed: Hash256,
    },
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
    #[error("Invalid combination of -regtest and -testnet")]
    ConflictingNetworks,
    #[error("Network already selected as {active}, cannot switch to {requested}")]
    AlreadySelected {
        active: NetworkId,
        requested: NetworkId,
    },
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
    #[error("Base58 error: {0}")]
    Base58Error(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::ConfigError(err.to_string())
    }
}

impl From<hex::FromHexError> for ChainError {
    fn from(err: hex::FromHexError) -> Self {
        ChainError::InvalidHex(err.to_string())
    }
}

impl From<bs58::decode::Error> for ChainError {
    fn from(err: bs58::decode::Error) -> Self {
        ChainError::Base58Error(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
