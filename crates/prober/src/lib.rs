//! Target Prober - one HTTP request per target, classified by fingerprint
//!
//! Every failure a single target can hit (bad scheme, connection refused,
//! DNS, TLS, timeout) is folded into a `ProbeOutcome::Failed` and never
//! propagates to the caller.

mod client;
mod prober;
pub mod normalizer;

pub use client::{build_client, ProbeConfig};
pub use prober::HttpProber;
pub use normalizer::normalize;
