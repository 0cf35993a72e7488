//! Core traits for sdto scan components

use crate::types::{ProbeOutcome, Target};
use async_trait::async_trait;

/// Performs the full request/response/match cycle for one target.
///
/// Implementations must not return early with an error: every failure is
/// folded into [`ProbeOutcome::Failed`] so one target never affects another.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: &Target) -> ProbeOutcome;

    /// Prober name/identifier
    fn name(&self) -> &str;
}
