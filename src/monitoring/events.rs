/*!
 * Event System
 * Strongly-typed lifecycle observability events
 */

use crate::core::id::SourceId;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Event severity for filtering and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

/// Event category for organization and querying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    Lifecycle,
    Resource,
}

/// Unified event type - all lifecycle observability flows through this
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic timestamp (nanoseconds since first event)
    pub timestamp_ns: u64,
    /// Event severity
    pub severity: Severity,
    /// Event category
    pub category: Category,
    /// Source id if applicable
    pub source: Option<SourceId>,
    /// Event payload
    pub payload: Payload,
}

/// Event payload - strongly typed variants for each transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Payload {
    SourceCreated {
        name: String,
    },
    TaggerAttached {
        taggers: u32,
    },
    TaggerDetached {
        taggers: u32,
    },
    SourceDisposed {
        lifetime_us: u64,
        forced: bool,
    },
    DoubleDisposeIgnored,
    ResourceLeaked {
        name: String,
    },
}

impl Event {
    /// Create a new event with current timestamp
    #[inline]
    pub fn new(severity: Severity, category: Category, payload: Payload) -> Self {
        Self {
            timestamp_ns: Self::now_ns(),
            severity,
            category,
            source: None,
            payload,
        }
    }

    /// Create event with source context
    #[inline]
    pub fn with_source(mut self, source: SourceId) -> Self {
        self.source = Some(source);
        self
    }

    /// Get current time in nanoseconds (monotonic)
    #[inline]
    fn now_ns() -> u64 {
        static START: OnceLock<Instant> = OnceLock::new();
        let start = START.get_or_init(Instant::now);
        start.elapsed().as_nanos() as u64
    }

    /// Get event age
    #[inline]
    pub fn age(&self) -> Duration {
        Duration::from_nanos(Self::now_ns().saturating_sub(self.timestamp_ns))
    }

    /// Check if event matches filter criteria
    #[inline]
    pub fn matches(&self, filter: &EventFilter) -> bool {
        if let Some(min_severity) = filter.min_severity {
            if self.severity < min_severity {
                return false;
            }
        }

        if let Some(category) = filter.category {
            if self.category != category {
                return false;
            }
        }

        if let Some(source) = filter.source {
            if self.source != Some(source) {
                return false;
            }
        }

        true
    }
}

/// Event filter for querying
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub min_severity: Option<Severity>,
    pub category: Option<Category>,
    pub source: Option<SourceId>,
}
