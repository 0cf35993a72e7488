//! Orchestrator - bounded fan-out of probes and result collection

mod admission;
mod coordinator;
mod progress;

use std::sync::Arc;

use sdto_common::{ScanOptions, ScanResult, SdtoResult};
use sdto_prober::HttpProber;

pub use admission::{AdmissionController, AdmissionSlot};
pub use coordinator::ScanCoordinator;
pub use progress::ProgressTracker;

/// Run a full HTTP scan.
///
/// Invalid options or an unusable header/proxy configuration fail here,
/// before any request is sent; per-target failures never do.
pub async fn scan(options: &ScanOptions) -> SdtoResult<ScanResult> {
    options.validate()?;
    let prober = HttpProber::from_options(options)?;
    let coordinator = ScanCoordinator::new(Arc::new(prober), options.concurrency)?;
    coordinator.run(options.targets.clone()).await
}
