//! Admission control - caps the number of in-flight probes

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use sdto_common::{SdtoError, SdtoResult};

/// Fixed-capacity gate in front of every probe.
#[derive(Debug)]
pub struct AdmissionController {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// One admission slot. Dropping it releases the slot, on every exit path.
#[derive(Debug)]
pub struct AdmissionSlot {
    _permit: OwnedSemaphorePermit,
}

impl AdmissionSlot {
    /// Give the slot back explicitly.
    pub fn release(self) {}
}

impl AdmissionController {
    pub fn new(capacity: usize) -> SdtoResult<Self> {
        if capacity == 0 {
            return Err(SdtoError::Config("concurrency must be at least 1".into()));
        }
        if capacity > Semaphore::MAX_PERMITS {
            return Err(SdtoError::Config(format!(
                "concurrency {capacity} exceeds the maximum of {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    /// Wait for a free slot.
    pub async fn acquire(&self) -> SdtoResult<AdmissionSlot> {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map(|permit| AdmissionSlot { _permit: permit })
            .map_err(|_| SdtoError::Cancelled)
    }

    /// Take a slot only if one is free right now.
    pub fn try_acquire(&self) -> Option<AdmissionSlot> {
        Arc::clone(&self.semaphore)
            .try_acquire_owned()
            .ok()
            .map(|permit| AdmissionSlot { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Slots currently held.
    pub fn in_flight(&self) -> usize {
        self.capacity - self.available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[test]
    fn zero_capacity_rejected() {
        assert!(matches!(AdmissionController::new(0), Err(SdtoError::Config(_))));
    }

    #[tokio::test]
    async fn starts_with_all_slots_free() {
        let gate = AdmissionController::new(3).unwrap();
        assert_eq!(gate.capacity(), 3);
        assert_eq!(gate.available(), 3);
        assert_eq!(gate.in_flight(), 0);
    }

    #[tokio::test]
    async fn acquire_blocks_at_capacity_until_release() {
        let gate = Arc::new(AdmissionController::new(2).unwrap());
        let a = gate.acquire().await.unwrap();
        let _b = gate.acquire().await.unwrap();
        assert_eq!(gate.in_flight(), 2);
        assert!(gate.try_acquire().is_none());

        // Third acquire must wait.
        assert!(timeout(Duration::from_millis(50), gate.acquire()).await.is_err());

        let waiter = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.acquire().await.map(|_| ()) })
        };
        a.release();
        timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should be admitted after release")
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn slot_released_when_holder_panics() {
        let gate = Arc::new(AdmissionController::new(1).unwrap());
        let slot = gate.acquire().await.unwrap();
        let handle = tokio::spawn(async move {
            let _slot = slot;
            panic!("probe blew up");
        });
        assert!(handle.await.is_err());
        assert_eq!(gate.available(), 1);
        assert!(gate.try_acquire().is_some());
    }
}
