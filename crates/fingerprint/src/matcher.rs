//! Response classification against a fingerprint set

use std::sync::Arc;

use sdto_common::{Fingerprint, SdtoResult};

use crate::defaults::default_fingerprints;

/// Statuses every fingerprint is evaluated for: `201..=598`.
///
/// A plain `200` only counts for fingerprints with `process_on_200`.
#[inline]
#[must_use]
pub fn is_processable_status(status: u16) -> bool {
    (201..599).contains(&status)
}

/// First fingerprint, in declaration order, that is eligible for `status`
/// and whose pattern occurs somewhere in `text`.
#[must_use]
pub fn find_match<'a>(
    fingerprints: &'a [Fingerprint],
    text: &str,
    status: u16,
) -> Option<&'a Fingerprint> {
    let processable = is_processable_status(status);
    fingerprints
        .iter()
        .find(|f| (processable || f.process_on_200) && f.is_match(text))
}

/// Shared, read-only handle on a compiled fingerprint set.
#[derive(Debug, Clone)]
pub struct FingerprintEngine {
    fingerprints: Arc<[Fingerprint]>,
}

impl FingerprintEngine {
    pub fn new(fingerprints: Arc<[Fingerprint]>) -> Self {
        Self { fingerprints }
    }

    /// Engine over the built-in set.
    pub fn with_defaults() -> SdtoResult<Self> {
        default_fingerprints().map(Self::new)
    }

    pub fn find_match(&self, text: &str, status: u16) -> Option<&Fingerprint> {
        find_match(&self.fingerprints, text, status)
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fingerprints.iter().map(|f| f.name.as_str())
    }
}
