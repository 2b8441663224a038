/*!
 * Lifecycle Monitoring
 * Event collection for source lifecycle transitions
 */

mod collector;
mod events;

pub use collector::Collector;
pub use events::{Category, Event, EventFilter, Payload, Severity};
