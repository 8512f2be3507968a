// Thin re-export module: implementation lives in `blockchain/core.rs`, split
// into the block record, chain management and validation rules.

pub mod core;
pub use core::*;
