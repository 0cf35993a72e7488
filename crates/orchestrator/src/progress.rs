//! Progress tracking

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

use sdto_common::{ProbeOutcome, ScanStats};

pub struct ProgressTracker {
    total: AtomicUsize,
    matched: AtomicUsize,
    unmatched: AtomicUsize,
    failed: AtomicUsize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total: AtomicUsize::new(total),
            matched: AtomicUsize::new(0),
            unmatched: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    pub fn record(&self, outcome: &ProbeOutcome) {
        let counter = match outcome {
            ProbeOutcome::Match(_) => &self.matched,
            ProbeOutcome::NoMatch => &self.unmatched,
            ProbeOutcome::Failed { .. } => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// A probe that ended without an outcome (its task panicked).
    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, elapsed: Duration) -> ScanStats {
        ScanStats {
            total_targets: self.total.load(Ordering::Relaxed),
            matched: self.matched.load(Ordering::Relaxed),
            unmatched: self.unmatched.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            elapsed,
        }
    }

    pub fn log_summary(&self, elapsed: Duration) {
        let stats = self.snapshot(elapsed);

        info!("Scan Summary:");
        info!("  Total targets: {}", stats.total_targets);
        info!("  Potential takeovers: {}", stats.matched);
        info!("  No match: {}", stats.unmatched);
        info!("  Failed: {}", stats.failed);
        info!("  Elapsed: {:.3}s", elapsed.as_secs_f64());
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(0)
    }
}
