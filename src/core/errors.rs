/*!
 * Usage Violations
 * Contract-violation definitions surfaced as panics, never as Results
 */

use crate::core::id::{SourceId, TaggerId};
use std::thread::ThreadId;
use thiserror::Error;

/// Contract violations in calling code
///
/// Every variant signals a defect in the caller, not an environmental
/// failure. The lifecycle logs the Display text and panics instead of
/// returning these; nothing here is retried or recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageViolation {
    /// Attach on a source that has already been torn down
    #[error("source {0} attached after disposal")]
    UseAfterDispose(SourceId),

    /// Detach with no outstanding taggers (unmatched detach)
    #[error("source {0} detached with no outstanding taggers")]
    NegativeCount(SourceId),

    /// Dispose invoked on an already-disposed source
    #[error("source {0} disposed twice")]
    DoubleDispose(SourceId),

    /// Call from a thread other than the recorded owner (debug builds)
    #[error("source {source_id} detached from thread {current:?}, owner is {owner:?}")]
    ThreadAffinityViolation {
        source_id: SourceId,
        owner: ThreadId,
        current: ThreadId,
    },

    /// Source dropped without disposal outside orderly shutdown (debug builds)
    #[error("source {0} ({1}) dropped without disposal")]
    LeakOnDrop(SourceId, &'static str),

    /// Tagger handle presented to a source it does not belong to (debug builds)
    #[error("tagger {tagger} belongs to source {expected}, not source {actual}")]
    ForeignTagger {
        tagger: TaggerId,
        expected: SourceId,
        actual: SourceId,
    },
}
