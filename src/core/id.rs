/*!
 * ID Generation
 * Type-safe id wrappers with atomic allocation
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared source id (64-bit, never recycled)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(pub u64);

/// Tagger id (64-bit, never recycled)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaggerId(pub u64);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TaggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic atomic counter for id allocation
///
/// Ids start at 1 so that 0 can serve as a sentinel in logs and dumps.
pub struct IdCounter(AtomicU64);

impl IdCounter {
    pub const fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    /// Allocate the next id
    #[inline]
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// Current counter value (for debugging)
    #[inline]
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn next_source_id() -> SourceId {
    static COUNTER: IdCounter = IdCounter::new();
    SourceId(COUNTER.next())
}

pub(crate) fn next_tagger_id() -> TaggerId {
    static COUNTER: IdCounter = IdCounter::new();
    TaggerId(COUNTER.next())
}
