use crate::blockchain::core::block::Block;
use crate::crypto::{is_hex_digest, FieldEncoding};
use crate::error::ChainError;
use rayon::prelude::*;

/// Checks that the stored hash is a well-formed digest matching the block's fields.
pub fn validate_block_hash(block: &Block, encoding: FieldEncoding) -> Result<(), ChainError> {
    if !is_hex_digest(block.hash()) {
        return Err(ChainError::MalformedHash {
            index: block.index(),
            found: block.hash().to_string(),
        });
    }

    let expected = block.calculate_hash(encoding);
    if expected != block.hash() {
        return Err(ChainError::InvalidHash {
            index: block.index(),
            expected,
            found: block.hash().to_string(),
        });
    }
    Ok(())
}

/// Checks that `new_block` is a correct successor of `prev`: next index,
/// linked through `prev_hash`, and carrying the hash of its own fields.
pub fn is_block_valid(new_block: &Block, prev: &Block, encoding: FieldEncoding) -> Result<(), ChainError> {
    let expected_index = prev
        .index()
        .checked_add(1)
        .ok_or(ChainError::IndexOverflow { index: prev.index() })?;
    if new_block.index() != expected_index {
        return Err(ChainError::InvalidIndex {
            expected: expected_index,
            found: new_block.index(),
        });
    }

    if new_block.prev_hash() != prev.hash() {
        return Err(ChainError::ChainLinkMismatch {
            index: new_block.index(),
            expected: prev.hash().to_string(),
            found: new_block.prev_hash().to_string(),
        });
    }

    validate_block_hash(new_block, encoding)
}

/// Genesis must sit at index 0 with no predecessor.
///
/// Chains written with the legacy code-point encoding left the genesis hash
/// empty, so under `CodePoint` an empty hash is accepted. Any other stored
/// hash must match the block's fields.
pub fn validate_genesis(block: &Block, encoding: FieldEncoding) -> Result<(), ChainError> {
    if block.index() != 0 {
        return Err(ChainError::InvalidGenesis(format!(
            "expected index 0, got {}",
            block.index()
        )));
    }
    if !block.prev_hash().is_empty() {
        return Err(ChainError::InvalidGenesis(format!(
            "expected no previous hash, got {}",
            block.prev_hash()
        )));
    }
    match encoding {
        FieldEncoding::CodePoint if block.hash().is_empty() => Ok(()),
        _ => validate_block_hash(block, encoding),
    }
}

/// Validates a whole sequence. Links are checked in parallel; the error
/// reported is always the one for the lowest failing position.
pub fn validate_chain(blocks: &[Block], encoding: FieldEncoding) -> Result<(), ChainError> {
    let genesis = blocks.first().ok_or(ChainError::EmptyChain)?;
    validate_genesis(genesis, encoding)?;

    match blocks
        .par_windows(2)
        .map(|pair| is_block_valid(&pair[1], &pair[0], encoding))
        .find_map_first(Result::err)
    {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
