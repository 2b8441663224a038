/*!
 * Tag Source Lifecycle Library
 * Reference-counted lifecycle management for shared tag sources
 */

pub mod core;
pub mod lifecycle;
pub mod monitoring;

// Re-exports
pub use crate::core::errors::UsageViolation;
pub use crate::core::id::{SourceId, TaggerId};
pub use crate::lifecycle::{
    begin_shutdown, shutdown_started, verify_all_disposed, SourceLifecycle, SourceMetadata,
    TaggerHandle,
};
pub use crate::monitoring::{Category, Collector, Event, EventFilter, Payload, Severity};
