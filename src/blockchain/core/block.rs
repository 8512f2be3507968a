use crate::crypto::{calculate_hash, FieldEncoding};
use crate::error::ChainError;
use serde::{Deserialize, Serialize};

/// One heart-rate reading in the chain.
///
/// Fields are private so a block built through [`Block::new`] always carries
/// the hash of its own contents. Blocks that arrive through deserialization
/// are not trusted; run them through the validation functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    index: u64,
    timestamp: String,
    #[serde(rename = "BPM", alias = "Value")]
    value: i64,
    hash: String,
    prev_hash: String,
}

impl Block {
    pub fn new(
        index: u64,
        timestamp: impl Into<String>,
        value: i64,
        prev_hash: impl Into<String>,
        encoding: FieldEncoding,
    ) -> Self {
        let timestamp = timestamp.into();
        let prev_hash = prev_hash.into();
        let hash = calculate_hash(index, &timestamp, value, &prev_hash, encoding);

        Block {
            index,
            timestamp,
            value,
            hash,
            prev_hash,
        }
    }

    /// First block of a chain: index 0, value 0 and no predecessor.
    pub fn genesis(timestamp: impl Into<String>, encoding: FieldEncoding) -> Self {
        Self::new(0, timestamp, 0, String::new(), encoding)
    }

    /// Builds the block that directly follows `self`. Fails when `self` already
    /// sits at `u64::MAX`.
    pub fn successor(
        &self,
        timestamp: impl Into<String>,
        value: i64,
        encoding: FieldEncoding,
    ) -> Result<Self, ChainError> {
        let index = self
            .index
            .checked_add(1)
            .ok_or(ChainError::IndexOverflow { index: self.index })?;
        Ok(Self::new(index, timestamp, value, self.hash.clone(), encoding))
    }

    /// Recomputes the fingerprint from the block's fields, ignoring the stored hash.
    pub fn calculate_hash(&self, encoding: FieldEncoding) -> String {
        calculate_hash(self.index, &self.timestamp, self.value, &self.prev_hash, encoding)
    }

    pub fn has_valid_hash(&self, encoding: FieldEncoding) -> bool {
        self.calculate_hash(encoding) == self.hash
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn prev_hash(&self) -> &str {
        &self.prev_hash
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }
}
