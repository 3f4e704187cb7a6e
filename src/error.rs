//! Error types for benchkv
//!
//! Provides a unified error type for all adapter operations.

use thiserror::Error;

/// Result type alias using BenchError
pub type Result<T> = std::result::Result<T, BenchError>;

/// Unified error type for benchkv operations
#[derive(Debug, Error)]
pub enum BenchError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    /// A value blob whose declared lengths overrun the buffer. Not
    /// recoverable locally; the caller maps it to an operation error.
    #[error("Record decode failed: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Engine Errors
    // -------------------------------------------------------------------------
    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Key not found")]
    KeyNotFound,

    // -------------------------------------------------------------------------
    // Scan Errors
    // -------------------------------------------------------------------------
    /// The keyspace's prefix convention was violated (non-numeric suffix
    /// where a numeral is expected). The scan cannot continue meaningfully.
    #[error("Prefix convention violated: {0}")]
    PrefixConvention(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    /// The engine context has already been closed; no new adapters can
    /// attach to it.
    #[error("Engine context is closed")]
    Closed,
}
