use crate::blockchain::core::block::Block;
use crate::blockchain::core::validation::{is_block_valid, validate_chain};
use crate::crypto::FieldEncoding;
use crate::error::ChainError;
use tracing::{debug, info, warn};

/// An owned, never-empty sequence of blocks linked by `prev_hash`.
///
/// Every mutation goes through validation, so a `Blockchain` value always
/// holds a chain that passes [`validate_chain`] under its encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blockchain {
    blocks: Vec<Block>,
    encoding: FieldEncoding,
}

impl Blockchain {
    /// Create a new `Blockchain` whose genesis block is stamped with the current time.
    pub fn new(encoding: FieldEncoding) -> Self {
        Self::with_genesis(now_timestamp(), encoding)
    }

    /// Create a new `Blockchain` with a fixed genesis timestamp.
    pub fn with_genesis(genesis_timestamp: impl Into<String>, encoding: FieldEncoding) -> Self {
        let genesis = Block::genesis(genesis_timestamp, encoding);
        debug!(hash = %genesis.hash(), "Created genesis block");

        Blockchain {
            blocks: vec![genesis],
            encoding,
        }
    }

    /// Adopt an existing sequence after validating it end to end.
    pub fn from_blocks(blocks: Vec<Block>, encoding: FieldEncoding) -> Result<Self, ChainError> {
        validate_chain(&blocks, encoding)?;
        Ok(Blockchain { blocks, encoding })
    }

    pub fn from_json(json: &str, encoding: FieldEncoding) -> Result<Self, ChainError> {
        let blocks: Vec<Block> = serde_json::from_str(json)?;
        Self::from_blocks(blocks, encoding)
    }

    pub fn to_json(&self) -> Result<String, ChainError> {
        Ok(serde_json::to_string_pretty(&self.blocks)?)
    }

    /// Latest block. Always `Some`: every constructor installs a genesis block
    /// and no operation removes blocks.
    pub fn tip(&self) -> Option<&Block> {
        self.blocks.last()
    }

    fn require_tip(&self) -> Result<&Block, ChainError> {
        self.tip().ok_or(ChainError::EmptyChain)
    }

    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn encoding(&self) -> FieldEncoding {
        self.encoding
    }

    /// Builds the successor of the current tip stamped with the current time.
    /// The block is not appended.
    pub fn generate_block(&self, value: i64) -> Result<Block, ChainError> {
        self.generate_block_at(value, now_timestamp())
    }

    pub fn generate_block_at(&self, value: i64, timestamp: impl Into<String>) -> Result<Block, ChainError> {
        let block = self.require_tip()?.successor(timestamp, value, self.encoding)?;
        debug!(index = block.index(), hash = %block.hash(), "Generated block");
        Ok(block)
    }

    /// Appends `block` if it is a valid successor of the current tip.
    pub fn add_block(&mut self, block: Block) -> Result<(), ChainError> {
        if let Err(e) = is_block_valid(&block, self.require_tip()?, self.encoding) {
            warn!(index = block.index(), "Rejected block: {}", e);
            return Err(e);
        }

        info!(index = block.index(), value = block.value(), hash = %block.hash(), "Appended block");
        self.blocks.push(block);
        Ok(())
    }

    /// Generates a block for `value` and appends it.
    pub fn append(&mut self, value: i64) -> Result<&Block, ChainError> {
        let block = self.generate_block(value)?;
        self.add_block(block)?;
        self.require_tip()
    }

    /// Longest-chain rule: adopt `candidate` when it is strictly longer than
    /// the local chain and valid. Returns whether the local chain changed.
    pub fn replace_chain(&mut self, candidate: Vec<Block>) -> Result<bool, ChainError> {
        if candidate.len() <= self.blocks.len() {
            debug!(
                local = self.blocks.len(),
                candidate = candidate.len(),
                "Candidate chain is not longer, keeping local chain"
            );
            return Ok(false);
        }

        if let Err(e) = validate_chain(&candidate, self.encoding) {
            warn!(candidate = candidate.len(), "Rejected candidate chain: {}", e);
            return Err(e);
        }

        info!(
            old_len = self.blocks.len(),
            new_len = candidate.len(),
            "Found longer chain, replacing local chain"
        );
        self.blocks = candidate;
        Ok(true)
    }

    pub fn validate(&self) -> Result<(), ChainError> {
        validate_chain(&self.blocks, self.encoding)
    }
}

fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
