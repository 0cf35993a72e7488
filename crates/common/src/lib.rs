//! sdto Common - Shared types and traits
//!
//! This crate provides the data model, error taxonomy and the `Prober`
//! seam used across the sdto workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{SdtoError, SdtoResult};
pub use traits::Prober;
pub use types::{
    Finding, Fingerprint, ProbeOutcome, ScanOptions, ScanResult, ScanStats, Target,
    DEFAULT_ACCEPT_LANGUAGE, DEFAULT_CONCURRENCY, DEFAULT_USER_AGENT,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
