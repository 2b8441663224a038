/*!
 * Reference-Counted Source Lifecycle
 *
 * Deterministic teardown for shared tag sources.
 *
 * ## Design Principles
 *
 * 1. **Deterministic**: disposal happens inside the detach that drops the
 *    count to zero, never at some later collection point
 * 2. **Exactly Once**: the disposed flag is monotonic; observers and the
 *    disconnect hook fire a single time
 * 3. **Single Owner Thread**: attach/detach are unsynchronized by design;
 *    debug builds verify the discipline, release builds trust it
 * 4. **Diagnostic Backstop**: leaked sources are caught at drop time and by
 *    a harness-facing registry, both suppressed during orderly shutdown
 *
 * ## Example
 *
 * ```rust
 * use tag_source::SourceLifecycle;
 *
 * let mut source = SourceLifecycle::new("syntax", || {
 *     // release underlying subscriptions here
 * });
 * let tagger = source.attach();
 * source.detach(tagger); // last detach disposes synchronously
 * assert!(source.is_disposed());
 * ```
 */

mod affinity;
mod sentinel;
mod shutdown;
mod source;

pub use sentinel::verify_all_disposed;
pub use shutdown::{begin_shutdown, shutdown_started};
pub use source::{SourceLifecycle, TaggerHandle};

use crate::core::id::SourceId;
use std::time::Instant;

/// Metadata attached to every source for logging and observability
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub name: &'static str,
    pub id: SourceId,
    pub creation_time: Instant,
}

impl SourceMetadata {
    pub(crate) fn new(name: &'static str, id: SourceId) -> Self {
        Self {
            name,
            id,
            creation_time: Instant::now(),
        }
    }

    /// Time since creation in microseconds
    #[inline]
    pub fn lifetime_micros(&self) -> u64 {
        self.creation_time.elapsed().as_micros() as u64
    }
}
