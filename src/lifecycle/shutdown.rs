/*!
 * Process Shutdown Flag
 * Write-once signal consulted by the leak sentinel
 */

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN_STARTED: AtomicBool = AtomicBool::new(false);

/// Mark the start of orderly process teardown
///
/// Idempotent, and there is no way to clear the flag. Sources dropped after
/// this point skip the leak check: teardown reclaims them in unspecified
/// order, so an undisposed source is no longer evidence of a bug.
pub fn begin_shutdown() {
    SHUTDOWN_STARTED.store(true, Ordering::Release);
}

/// Whether orderly shutdown has begun
#[inline]
pub fn shutdown_started() -> bool {
    SHUTDOWN_STARTED.load(Ordering::Acquire)
}
