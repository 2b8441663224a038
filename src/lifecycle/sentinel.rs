/*!
 * Leak Sentinel Registry
 * Debug-only ledger of live sources, checked by test harnesses
 */

use crate::core::id::SourceId;

#[cfg(debug_assertions)]
use dashmap::DashMap;
#[cfg(debug_assertions)]
use std::sync::OnceLock;

#[cfg(debug_assertions)]
fn registry() -> &'static DashMap<SourceId, &'static str> {
    static LIVE: OnceLock<DashMap<SourceId, &'static str>> = OnceLock::new();
    LIVE.get_or_init(DashMap::new)
}

#[cfg(debug_assertions)]
pub(crate) fn register(id: SourceId, name: &'static str) {
    registry().insert(id, name);
}

#[cfg(debug_assertions)]
pub(crate) fn deregister(id: SourceId) {
    registry().remove(&id);
}

/// Assert that every source created so far has been disposed
///
/// Harness-facing: call at the end of a test or right before process exit.
/// Skipped silently once [`begin_shutdown`](super::begin_shutdown) has been
/// observed, since teardown reclaims sources in unspecified order. Release
/// builds compile this to a no-op.
///
/// # Panics
///
/// Panics naming every live source when at least one was never disposed.
#[cfg(debug_assertions)]
pub fn verify_all_disposed() {
    if super::shutdown::shutdown_started() {
        return;
    }

    let live = registry();
    if live.is_empty() {
        return;
    }

    let names: Vec<String> = live
        .iter()
        .map(|entry| format!("{} ({})", entry.key(), entry.value()))
        .collect();
    panic!("undisposed sources: {}", names.join(", "));
}

#[cfg(not(debug_assertions))]
pub(crate) fn register(_id: SourceId, _name: &'static str) {}

#[cfg(not(debug_assertions))]
pub(crate) fn deregister(_id: SourceId) {}

/// No-op in release builds; the ledger only exists under debug assertions.
#[cfg(not(debug_assertions))]
pub fn verify_all_disposed() {}
