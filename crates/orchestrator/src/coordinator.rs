// crates/orchestrator/src/coordinator.rs
//! Scan coordinator - fans probes out under the admission gate and collects matches

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info, instrument};
use uuid::Uuid;

use sdto_common::{Finding, Prober, ScanResult, SdtoResult, Target};

use crate::admission::AdmissionController;
use crate::progress::ProgressTracker;

/// Runs one probe per target with at most `concurrency` in flight.
pub struct ScanCoordinator {
    prober: Arc<dyn Prober>,
    admission: Arc<AdmissionController>,
}

impl ScanCoordinator {
    /// Fails with `Config` when `concurrency` is zero.
    pub fn new(prober: Arc<dyn Prober>, concurrency: usize) -> SdtoResult<Self> {
        Ok(Self {
            prober,
            admission: Arc::new(AdmissionController::new(concurrency)?),
        })
    }

    pub fn admission(&self) -> &AdmissionController {
        &self.admission
    }

    /// Probe every target and wait for all of them.
    ///
    /// Targets are admitted in submission order; findings come back in
    /// completion order. Per-target failures only show up in the stats.
    #[instrument(skip_all, fields(targets = targets.len(), prober = self.prober.name()))]
    pub async fn run(&self, targets: Vec<Target>) -> SdtoResult<ScanResult> {
        let id = Uuid::new_v4();
        let started = Instant::now();
        info!(
            "Starting scan {} targets={} concurrency={}",
            id,
            targets.len(),
            self.admission.capacity()
        );

        let progress = Arc::new(ProgressTracker::new(targets.len()));
        let results: Arc<Mutex<Vec<Finding>>> = Arc::new(Mutex::new(Vec::new()));
        let mut probes = JoinSet::new();

        for target in targets {
            let slot = self.admission.acquire().await?;
            reap_finished(&mut probes, &progress);
            let prober = Arc::clone(&self.prober);
            let progress = Arc::clone(&progress);
            let results = Arc::clone(&results);

            probes.spawn(async move {
                // Released when the task ends, whether it returns or unwinds.
                let _slot = slot;
                let outcome = prober.probe(&target).await;
                progress.record(&outcome);
                if let Some(finding) = outcome.into_finding() {
                    results.lock().await.push(finding);
                }
            });
        }

        while let Some(joined) = probes.join_next().await {
            record_join(joined, &progress);
        }

        let elapsed = started.elapsed();
        progress.log_summary(elapsed);

        let findings = std::mem::take(&mut *results.lock().await);
        Ok(ScanResult::new(id, findings, progress.snapshot(elapsed)))
    }
}

/// Collect probe tasks that already finished so the set only holds the
/// ones still in flight. Returns how many were collected.
fn reap_finished(probes: &mut JoinSet<()>, progress: &ProgressTracker) -> usize {
    let mut reaped = 0;
    while let Some(joined) = probes.try_join_next() {
        record_join(joined, progress);
        reaped += 1;
    }
    reaped
}

fn record_join(joined: Result<(), JoinError>, progress: &ProgressTracker) {
    if let Err(e) = joined {
        error!(error = %e, "Probe task ended without an outcome");
        progress.record_failed();
    }
}
