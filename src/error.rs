//! Error types for SetKV
//!
//! Load and save anomalies are never errors here: they degrade to
//! `LoadReport` / `SaveOutcome` values. Errors cover the outer surfaces.

use thiserror::Error;

/// Result type alias using SetKvError
pub type Result<T> = std::result::Result<T, SetKvError>;

/// Unified error type for SetKV operations
#[derive(Debug, Error)]
pub enum SetKvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Command Stream Errors
    // -------------------------------------------------------------------------
    #[error("Command error: {0}")]
    Command(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
