//! Block hashing primitives for bpmchain
//!
//! A block's fingerprint is the SHA-256 digest of its fields concatenated as
//! text in a fixed order (`index`, `timestamp`, `value`, `prev_hash`), encoded
//! as 64 lowercase hex characters.

use crate::error::ChainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length of a hex-encoded SHA-256 digest.
pub const HASH_HEX_LEN: usize = 64;

/// How integer fields are turned into text before hashing.
///
/// `Decimal` writes base-10 digits. `CodePoint` reproduces the legacy
/// encoding where an integer becomes the single Unicode scalar with that
/// number (UTF-8 encoded), and anything that is not a valid scalar value
/// (negative, surrogate, above U+10FFFF) becomes U+FFFD. Hashes produced
/// under the two encodings are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldEncoding {
    #[default]
    Decimal,
    CodePoint,
}

impl FieldEncoding {
    pub fn encode_integer(self, n: i128) -> String {
        match self {
            FieldEncoding::Decimal => n.to_string(),
            FieldEncoding::CodePoint => u32::try_from(n)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
                .to_string(),
        }
    }
}

impl fmt::Display for FieldEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldEncoding::Decimal => write!(f, "decimal"),
            FieldEncoding::CodePoint => write!(f, "code_point"),
        }
    }
}

impl FromStr for FieldEncoding {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "decimal" => Ok(FieldEncoding::Decimal),
            "code_point" | "codepoint" | "legacy" => Ok(FieldEncoding::CodePoint),
            other => Err(ChainError::ConfigError(format!(
                "Unknown hash encoding '{}', expected 'decimal' or 'code_point'",
                other
            ))),
        }
    }
}

/// The exact byte sequence that is fed to SHA-256 for a block.
pub fn hash_record(
    index: u64,
    timestamp: &str,
    value: i64,
    prev_hash: &str,
    encoding: FieldEncoding,
) -> Vec<u8> {
    let mut record = encoding.encode_integer(i128::from(index));
    record.push_str(timestamp);
    record.push_str(&encoding.encode_integer(i128::from(value)));
    record.push_str(prev_hash);
    record.into_bytes()
}

/// Computes the hex-encoded SHA-256 fingerprint of a block's fields.
pub fn calculate_hash(
    index: u64,
    timestamp: &str,
    value: i64,
    prev_hash: &str,
    encoding: FieldEncoding,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(hash_record(index, timestamp, value, prev_hash, encoding));
    hex::encode(hasher.finalize())
}

/// True when `s` looks like an output of [`calculate_hash`].
pub fn is_hex_digest(s: &str) -> bool {
    s.len() == HASH_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
