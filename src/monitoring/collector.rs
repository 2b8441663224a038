/*!
 * Event Collector
 * Bounded in-memory sink for lifecycle events
 */

use super::events::{Event, EventFilter};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default capacity of the event buffer
const DEFAULT_CAPACITY: usize = 1024;

/// Bounded event collector; oldest events are evicted once full
///
/// Sources hold an `Option<Arc<Collector>>` and emit into it on every
/// transition. Emission never blocks the lifecycle beyond the buffer lock,
/// and a source without a collector skips emission entirely.
pub struct Collector {
    events: Mutex<VecDeque<Event>>,
    capacity: usize,
    emitted: AtomicU64,
    evicted: AtomicU64,
}

impl Collector {
    /// Create a collector with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a collector holding at most `capacity` buffered events
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            emitted: AtomicU64::new(0),
            evicted: AtomicU64::new(0),
        }
    }

    /// Emit an event (primary API)
    pub fn emit(&self, event: Event) {
        self.emitted.fetch_add(1, Ordering::Relaxed);

        let mut events = self.events.lock();
        if events.len() == self.capacity {
            events.pop_front();
            self.evicted.fetch_add(1, Ordering::Relaxed);
        }
        events.push_back(event);
    }

    /// Snapshot of buffered events, oldest first
    pub fn recent(&self) -> Vec<Event> {
        self.events.lock().iter().cloned().collect()
    }

    /// Buffered events matching a filter, oldest first
    pub fn matching(&self, filter: &EventFilter) -> Vec<Event> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.matches(filter))
            .cloned()
            .collect()
    }

    /// Total events emitted since creation
    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    /// Events evicted to stay within capacity
    #[inline]
    pub fn evicted(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    /// Drop all buffered events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}
