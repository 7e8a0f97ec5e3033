//! Library entry for intelhex-cli used by integration tests and embedding.

pub mod address;
pub mod commands;

// Re-export commands for convenience
pub use commands::*;

pub use crate::address::parse_address;
