//! Shared helpers for the command-line front end

use crate::blockchain::{Block, Blockchain};
use crate::config::Config;
use crate::crypto::FieldEncoding;
use crate::error::ChainError;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::Level;

/// Path value that stands for stdin/stdout.
pub const STDIO_PATH: &str = "-";

/// Installs the fmt subscriber on stderr. Later calls are no-ops.
pub fn init_tracing(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

/// Fresh chain following the configured genesis and encoding.
pub fn new_blockchain(config: &Config, encoding: FieldEncoding) -> Blockchain {
    match &config.chain.genesis_timestamp {
        Some(ts) => Blockchain::with_genesis(ts.clone(), encoding),
        None => Blockchain::new(encoding),
    }
}

/// Reads raw, unvalidated blocks from `path` (or stdin for `-`).
pub fn read_blocks(path: &Path) -> Result<Vec<Block>, ChainError> {
    let json = if path.as_os_str() == STDIO_PATH {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)
            .map_err(|e| ChainError::IoError(format!("Failed to read {}: {}", path.display(), e)))?
    };

    Ok(serde_json::from_str(&json)?)
}

/// Reads and validates a JSON chain from `path` (or stdin for `-`).
pub fn read_chain(path: &Path, encoding: FieldEncoding) -> Result<Blockchain, ChainError> {
    Blockchain::from_blocks(read_blocks(path)?, encoding)
}

/// Writes the chain as pretty JSON to `path` (or stdout for `-`).
pub fn write_chain(chain: &Blockchain, path: &Path) -> Result<(), ChainError> {
    let json = chain.to_json()?;

    if path.as_os_str() == STDIO_PATH {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json)?;
        return Ok(());
    }

    fs::write(path, format!("{}\n", json))
        .map_err(|e| ChainError::IoError(format!("Failed to write {}: {}", path.display(), e)))
}
