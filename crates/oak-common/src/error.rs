//! Error types for OakDB.

use thiserror::Error;

/// Result type alias using OakError.
pub type Result<T> = std::result::Result<T, OakError>;

/// Errors that can occur in OakDB operations.
#[derive(Debug, Error)]
pub enum OakError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Storage errors
    #[error("Block not found: {block_id}")]
    BlockNotFound { block_id: i64 },

    #[error("Block corrupted: {block_id}, reason: {reason}")]
    BlockCorrupted { block_id: u64, reason: String },

    // Pair validation errors
    #[error("Key should not be empty")]
    EmptyKey,

    #[error("Value should not be empty")]
    EmptyValue,

    #[error("Key too large: {size} bytes (max {max})")]
    KeyTooLarge { size: usize, max: usize },

    #[error("Value too large: {size} bytes (max {max})")]
    ValueTooLarge { size: usize, max: usize },

    // Tree errors
    #[error("Key not found")]
    KeyNotFound,

    #[error("Tree corrupted: {0}")]
    TreeCorrupted(String),

    // Handle errors
    #[error("Store already closed")]
    AlreadyClosed,

    // Protocol errors
    #[error("Protocol error: {0}")]
    Protocol(String),
}
