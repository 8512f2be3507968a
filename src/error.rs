//! Error types for bpmchain

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    ChainLinkMismatch {
        index: u64,
        expected: String,
        found: String,
    },
    InvalidIndex {
        expected: u64,
        found: u64,
    },
    IndexOverflow {
        index: u64,
    },
    InvalidHash {
        index: u64,
        expected: String,
        found: String,
    },
    MalformedHash {
        index: u64,
        found: String,
    },
    InvalidGenesis(String),
    EmptyChain,
    ConfigError(String),
    IoError(String),
    SerializationError(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainError::ChainLinkMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "Block {} does not link to its predecessor: expected previous hash {}, got {}",
                index, expected, found
            ),
            ChainError::InvalidIndex { expected, found } => {
                write!(f, "Invalid block index. Expected {}, but got {}", expected, found)
            }
            ChainError::IndexOverflow { index } => {
                write!(f, "Block {} is at the maximum index and cannot have a successor", index)
            }
            ChainError::InvalidHash {
                index,
                expected,
                found,
            } => write!(
                f,
                "Block {} has a stale hash: computed {}, stored {}",
                index, expected, found
            ),
            ChainError::MalformedHash { index, found } => write!(
                f,
                "Block {} stores '{}', which is not a 64-character lowercase hex digest",
                index, found
            ),
            ChainError::InvalidGenesis(msg) => write!(f, "Invalid genesis block: {}", msg),
            ChainError::EmptyChain => write!(f, "Chain has no blocks"),
            ChainError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ChainError::IoError(msg) => write!(f, "IO error: {}", msg),
            ChainError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ChainError {}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::ConfigError(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
