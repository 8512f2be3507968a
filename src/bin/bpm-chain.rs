#![forbid(unsafe_code)]
//! Command-line front end for bpmchain

use bpmchain::blockchain::{is_block_valid, validate_genesis, Blockchain};
use bpmchain::cli::{init_tracing, new_blockchain, read_blocks, read_chain, write_chain, STDIO_PATH};
use bpmchain::config::{load_config, DEFAULT_CONFIG_PATH};
use bpmchain::crypto::{calculate_hash, FieldEncoding};
use bpmchain::error::ChainError;
use clap::{Parser, Subcommand};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Color as TableColor;
use comfy_table::{Cell, ContentArrangement, Table};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Integer field encoding: `decimal` or `code_point` (legacy)
    #[arg(long, global = true)]
    encoding: Option<FieldEncoding>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the hash of a single block record
    Hash {
        #[arg(long)]
        index: u64,
        #[arg(long)]
        timestamp: String,
        #[arg(long, allow_hyphen_values = true)]
        value: i64,
        #[arg(long, default_value = "")]
        prev_hash: String,
    },
    /// Builds a new chain holding one block per value
    Build {
        #[arg(allow_hyphen_values = true)]
        values: Vec<i64>,
        /// Output file, `-` for stdout
        #[arg(long, default_value = STDIO_PATH)]
        out: PathBuf,
    },
    /// Validates a JSON chain and prints a summary
    Verify {
        /// Chain file, `-` for stdin
        #[arg(default_value = STDIO_PATH)]
        chain: PathBuf,
    },
    /// Appends one reading to a chain file
    Append {
        chain: PathBuf,
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Replaces the local chain with the candidate if it is longer and valid
    Merge { local: PathBuf, candidate: PathBuf },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_tracing(config.log_level()?);
    let encoding = cli.encoding.unwrap_or(config.chain.hash_encoding);

    match cli.command {
        Commands::Hash {
            index,
            timestamp,
            value,
            prev_hash,
        } => {
            println!("{}", calculate_hash(index, &timestamp, value, &prev_hash, encoding));
        }
        Commands::Build { values, out } => {
            let mut chain = new_blockchain(&config, encoding);
            for value in values {
                chain.append(value)?;
            }
            write_chain(&chain, &out)?;
            if out.as_os_str() != STDIO_PATH {
                println!(
                    "{} {} blocks written to {}",
                    "✅".green(),
                    chain.len(),
                    out.display().to_string().bright_white()
                );
            }
        }
        Commands::Verify { chain } => verify(&chain, encoding)?,
        Commands::Append { chain: path, value } => {
            let mut chain = read_chain(&path, encoding)?;
            let block = chain.append(value)?.clone();
            write_chain(&chain, &path)?;
            println!(
                "{} Block {} appended: {}",
                "✅".green(),
                block.index(),
                block.hash().bright_cyan()
            );
        }
        Commands::Merge { local, candidate } => {
            let mut chain = read_chain(&local, encoding)?;
            let candidate = read_chain(&candidate, encoding)?;
            if chain.replace_chain(candidate.into_blocks())? {
                write_chain(&chain, &local)?;
                println!(
                    "{} Local chain replaced, new length {}",
                    "🔁".bright_green(),
                    chain.len()
                );
            } else {
                println!(
                    "{}",
                    "Candidate chain is not longer; local chain kept.".yellow()
                );
            }
        }
    }

    Ok(())
}

/// Loads the raw blocks instead of going through `read_chain`, so every
/// block can be reported individually before the chain verdict.
fn verify(path: &Path, encoding: FieldEncoding) -> Result<(), ChainError> {
    let blocks = read_blocks(path)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Index", "Timestamp", "BPM", "Hash", "Prev Hash", "Status"]);

    for (i, block) in blocks.iter().enumerate() {
        let check = match i {
            0 => validate_genesis(block, encoding),
            _ => is_block_valid(block, &blocks[i - 1], encoding),
        };
        let status = match &check {
            Ok(()) => Cell::new("ok").fg(TableColor::Green),
            Err(e) => Cell::new(e.to_string()).fg(TableColor::Red),
        };
        table.add_row(vec![
            Cell::new(block.index()),
            Cell::new(block.timestamp()),
            Cell::new(block.value()),
            Cell::new(short_hash(block.hash())),
            Cell::new(short_hash(block.prev_hash())),
            status,
        ]);
    }
    println!("{table}");

    match Blockchain::from_blocks(blocks, encoding) {
        Ok(chain) => {
            println!(
                "{} Chain of {} blocks is valid ({} encoding)",
                "✅".green(),
                chain.len(),
                encoding
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "❌ Chain is invalid:".red().bold(), e);
            Err(e)
        }
    }
}

fn short_hash(hash: &str) -> String {
    if hash.is_empty() {
        "-".to_string()
    } else if hash.chars().count() > 16 {
        format!("{}...", hash.chars().take(13).collect::<String>())
    } else {
        hash.to_string()
    }
}
