//! The pause/resume latch consulted by the executor at every suspension point.
//!
//! Modeled as a one-shot-per-transition awaitable latch rather than a flag
//! the executor polls, so a paused run goes fully idle instead of
//! busy-looping (`§9` design note).

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

use crate::cancel::CancelToken;
use crate::error::TypingError;

/// Shared pause state for one engine run.
#[derive(Debug, Default)]
pub struct PauseLatch {
    paused: AtomicBool,
    resumed: Notify,
}

impl PauseLatch {
    /// A latch starting in the unpaused state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pause state.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Enter the paused state.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    /// Leave the paused state, waking anything blocked in [`Self::gate`].
    ///
    /// The engine facade's resume countdown happens entirely above this
    /// call: by the time `resume()` reaches the latch, the countdown has
    /// already completed (or the caller re-paused during it, in which case
    /// this is never called).
    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
        self.resumed.notify_waiters();
    }

    /// Block here while paused. A no-op when not paused. Cancellation during
    /// a pause still takes priority and unwinds the executor.
    pub async fn gate(&self, cancel: &CancelToken) -> Result<(), TypingError> {
        while self.is_paused() {
            cancel.wait_for(&self.resumed).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn gate_returns_immediately_when_not_paused() {
        let latch = PauseLatch::new();
        let cancel = CancelToken::new();
        assert!(latch.gate(&cancel).await.is_ok());
    }

    #[tokio::test]
    async fn resume_wakes_a_waiting_gate() {
        let latch = std::sync::Arc::new(PauseLatch::new());
        latch.pause();
        let cancel = CancelToken::new();

        let waiter_latch = latch.clone();
        let waiter_cancel = cancel.clone();
        let handle = tokio::spawn(async move { waiter_latch.gate(&waiter_cancel).await });

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        latch.resume();

        let result = tokio::time::timeout(std::time::Duration::from_millis(200), handle)
            .await
            .expect("resume should wake the gate promptly")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn cancellation_wins_over_an_open_pause() {
        let latch = PauseLatch::new();
        latch.pause();
        let cancel = CancelToken::new();
        cancel.cancel();
        assert!(matches!(latch.gate(&cancel).await, Err(TypingError::Cancelled)));
    }
}
