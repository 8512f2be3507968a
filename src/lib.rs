//! bpmchain - a minimal heart-rate blockchain
//!
//! Each block records one integer reading (beats per minute) together with a
//! timestamp, its position in the chain and the hash of its predecessor. The
//! block's own hash is the SHA-256 of those fields rendered as text.
//!
//! # Architecture
//!
//! ## Core Blockchain
//! - [`blockchain`] - Block record, chain management and validation
//! - [`crypto`] - Block hashing and integer field encodings
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`cli`] - CLI utilities (logging setup, chain file I/O)

#![forbid(unsafe_code)]

// ============================================================================
// Core Blockchain
// ============================================================================
pub mod blockchain;
pub mod crypto;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod cli;
pub mod config;
pub mod error;

pub use blockchain::{Block, Blockchain};
pub use crypto::{calculate_hash, FieldEncoding};
pub use error::{ChainError, Result};
