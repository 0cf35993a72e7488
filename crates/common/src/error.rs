//! Error types for sdto
//!
//! Per-target variants (`InvalidScheme`, `InvalidTarget`, `Network`, `Decode`)
//! never escape a probe; `Format` and `Config` abort a run before any request is sent.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdtoError {
    #[error("Bad fingerprints format: {0}")]
    Format(String),

    #[error("Bad url scheme in {0:?}")]
    InvalidScheme(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Operation cancelled")]
    Cancelled,
}

impl SdtoError {
    /// Whether the error only affects the target it was raised for.
    #[must_use]
    pub const fn is_per_target(&self) -> bool {
        matches!(
            self,
            SdtoError::InvalidScheme(_)
                | SdtoError::InvalidTarget(_)
                | SdtoError::Network(_)
                | SdtoError::Decode(_)
        )
    }
}

/// Result type alias for sdto operations
pub type SdtoResult<T> = Result<T, SdtoError>;
