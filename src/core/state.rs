//! Engine lifecycle: exactly-once lazy initialization, explicit shutdown,
//! and the process-wide lock that serializes all codec work.
//!
//! The underlying libvips engine is a single, process-wide, non-reentrant
//! resource. Its thread-safety is not assumed: every codec-touching call
//! (initialization, decode, resize, colour conversion, encode, metadata,
//! shutdown) runs while holding the one lock in this module. Concurrent
//! compression requests therefore queue rather than parallelize. Do not add
//! per-thread codec instances without independently verifying the engine
//! supports them.

use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use tracing::{debug, info};

use crate::processing::libvips::VipsBackend;
use crate::utils::{CompressorError, CompressorResult};

/// Guard keeping the libvips runtime alive.
///
/// `VipsApp` initializes the libvips thread pool and global state on
/// creation and shuts it down on drop.
///
/// # Safety
/// The guard only ever lives inside the engine mutex, so it is moved and
/// dropped under the lock; it is never used from two threads at once.
struct VipsAppGuard(libvips::VipsApp);

unsafe impl Send for VipsAppGuard {}
unsafe impl Sync for VipsAppGuard {}

/// Process-wide engine state, mutated only under the engine lock.
enum EngineState {
    Uninitialized,
    Ready(VipsAppGuard),
}

lazy_static! {
    static ref ENGINE: Mutex<EngineState> = Mutex::new(EngineState::Uninitialized);
}

fn lock_engine() -> MutexGuard<'static, EngineState> {
    // A panic inside a codec call leaves the state itself coherent; keep
    // serving callers instead of poisoning every later request.
    ENGINE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Runs `f` against the codec backend while holding the engine lock.
///
/// Initializes the engine first if needed: the first caller pays for
/// initialization, concurrent callers block until it finishes and then
/// observe the same outcome. A failed initialization is reported as
/// `EngineUnavailable` and retried on the next call; it does not poison
/// the engine permanently.
///
/// This is the only way to obtain a [`VipsBackend`], which forces every
/// codec access path through the lock.
pub fn with_engine<T, F>(f: F) -> CompressorResult<T>
where
    F: FnOnce(&VipsBackend) -> CompressorResult<T>,
{
    let mut state = lock_engine();

    if let EngineState::Uninitialized = *state {
        let app = libvips::VipsApp::default("image-compressor").map_err(|e| {
            CompressorError::engine(format!("libvips initialization failed: {e}"))
        })?;
        // 0 = let libvips decide based on available CPU cores
        app.concurrency_set(0);
        info!("libvips initialized");
        *state = EngineState::Ready(VipsAppGuard(app));
    }

    f(&VipsBackend::new())
}

/// Ensures the engine is initialized. Returns `false` when initialization
/// failed; the next call will retry.
pub fn ensure_ready() -> bool {
    with_engine(|_| Ok(())).is_ok()
}

/// Tears the engine down and resets to uninitialized.
///
/// Safe to call when the engine was never initialized or is already shut
/// down (no-op). A later call to [`ensure_ready`] re-initializes.
pub fn shutdown() {
    let mut state = lock_engine();
    if matches!(*state, EngineState::Ready(_)) {
        // Dropping the guard shuts the libvips runtime down.
        *state = EngineState::Uninitialized;
        info!("libvips shut down");
    } else {
        debug!("Shutdown requested but engine was not initialized");
    }
}
