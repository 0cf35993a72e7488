//! Fingerprint Store - takeover signature loading and matching
//!
//! This crate provides:
//! - the built-in fingerprint table, compiled once per process
//! - loading of external JSON fingerprint definitions
//! - first-match classification of a response by status and body

mod defaults;
mod loader;
mod matcher;

pub use defaults::{default_fingerprints, DEFAULT_DEFINITIONS};
pub use loader::{load_definitions, load_from_reader, load_from_str, FingerprintDefinition};
pub use matcher::{find_match, is_processable_status, FingerprintEngine};
