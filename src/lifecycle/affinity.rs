/*!
 * Owner-Thread Affinity Guard
 * Debug-only verification of single-owner-thread call discipline
 */

use crate::core::id::SourceId;

#[cfg(debug_assertions)]
use crate::core::errors::UsageViolation;
#[cfg(debug_assertions)]
use std::thread::{self, ThreadId};

/// Records the owner thread at first attach and asserts later detaches
/// come from it
///
/// The owner identity, once recorded, never changes. Release builds compile
/// this to a zero-sized no-op; the discipline is the caller's to keep.
#[cfg(debug_assertions)]
#[derive(Debug, Default)]
pub(crate) struct AffinityGuard {
    owner: Option<ThreadId>,
}

#[cfg(debug_assertions)]
impl AffinityGuard {
    /// Record the calling thread as owner. First call wins.
    pub(crate) fn record(&mut self) {
        if self.owner.is_none() {
            self.owner = Some(thread::current().id());
        }
    }

    /// Panic if the calling thread is not the recorded owner
    pub(crate) fn verify(&self, source: SourceId) {
        let current = thread::current().id();
        if let Some(owner) = self.owner {
            if owner != current {
                let violation = UsageViolation::ThreadAffinityViolation {
                    source_id: source,
                    owner,
                    current,
                };
                log::error!("{violation}");
                panic!("{violation}");
            }
        }
    }
}

#[cfg(not(debug_assertions))]
#[derive(Debug, Default)]
pub(crate) struct AffinityGuard;

#[cfg(not(debug_assertions))]
impl AffinityGuard {
    #[inline(always)]
    pub(crate) fn record(&mut self) {}

    #[inline(always)]
    pub(crate) fn verify(&self, _source: SourceId) {}
}
