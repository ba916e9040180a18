//! Error types for SeqLog
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using SeqLogError
pub type Result<T> = std::result::Result<T, SeqLogError>;

/// Unified error type for SeqLog operations
#[derive(Debug, Error)]
pub enum SeqLogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Malformed record: expected {expected} bytes, got {actual}")]
    MalformedRecord { expected: usize, actual: usize },

    // -------------------------------------------------------------------------
    // Log Errors
    // -------------------------------------------------------------------------
    #[error("Log not initialized: {}", .0.display())]
    NotInitialized(PathBuf),

    #[error("Truncated record at offset {offset}: {trailing} trailing bytes")]
    TruncatedRecord { offset: u64, trailing: usize },

    #[error("Record write failed: {0}")]
    WriteFailed(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // Sequence Errors
    // -------------------------------------------------------------------------
    #[error("Sequence overflow: {a} + {b} exceeds u32::MAX")]
    Overflow { a: u32, b: u32 },

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("Session not ready: `{0}` requires `init` first")]
    NotReady(&'static str),

    #[error("Session worker unavailable: {0}")]
    WorkerUnavailable(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
