//! Error types for colstore
//!
//! Provides a unified error type for all operations. Every fallible
//! operation returns `Result<T>`; errors propagate to a single top-level
//! boundary (the CLI) which renders the message and exits non-zero.

use thiserror::Error;

/// Result type alias using ColstoreError
pub type Result<T> = std::result::Result<T, ColstoreError>;

/// Unified error type for colstore operations
#[derive(Debug, Error)]
pub enum ColstoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Format / Consistency Errors
    // -------------------------------------------------------------------------
    #[error("Format error: {0}")]
    Format(String),

    #[error("Decompressed extent length {actual} does not match recorded logical size {expected}")]
    LogicalSizeMismatch { expected: u64, actual: u64 },

    #[error("Premature end of data: {0}")]
    PrematureEndOfData(String),

    #[error("Expected exactly one table, file contains {found}")]
    TableCount { found: u64 },

    // -------------------------------------------------------------------------
    // Compression Errors
    // -------------------------------------------------------------------------
    #[error("Compression error: {0}")]
    Compression(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
