//! Stop control for search runs
//!
//! Each run gets its own [`CancellationToken`]. The operator-facing
//! [`StopControl`] hands out a fresh token when a run begins and cancels the
//! current one on request, so a stop never leaks into the next run.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

/// Operator handle for stopping the current run
#[derive(Debug, Default)]
pub struct StopControl {
    current: Mutex<CancellationToken>,
}

impl StopControl {
    /// Creates a control whose current token is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new run: installs a fresh token and returns it
    ///
    /// Any stop requested before this call does not affect the new run.
    pub fn begin_run(&self) -> CancellationToken {
        let token = CancellationToken::new();
        *self.lock() = token.clone();
        token
    }

    /// Asks the current run to stop at its next checkpoint
    pub fn request_stop(&self) {
        let token = self.lock();
        if !token.is_cancelled() {
            tracing::info!("Stop requested");
        }
        token.cancel();
    }

    /// Clears a pending stop without starting a run
    pub fn reset(&self) {
        *self.lock() = CancellationToken::new();
    }

    /// Returns true if the current run has been asked to stop
    pub fn is_stop_requested(&self) -> bool {
        self.lock().is_cancelled()
    }

    fn lock(&self) -> MutexGuard<'_, CancellationToken> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
