//! Cooperative cancellation token, consulted at every suspension point.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;

use crate::error::TypingError;

/// A cheaply-cloneable cancellation flag with a wakeup for sleepers.
///
/// Unlike a plain polled `AtomicBool`, waiting on [`CancelToken::sleep`]
/// returns as soon as `cancel()` is called rather than at the next poll —
/// no suspension point busy-loops.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelToken {
    /// Create a fresh, not-yet-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Request cancellation, waking anything blocked in [`Self::sleep`] or
    /// [`Self::wait`].
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// True once [`Self::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with [`TypingError::Cancelled`] if already cancelled; otherwise `Ok(())`.
    pub fn check(&self) -> Result<(), TypingError> {
        if self.is_cancelled() {
            Err(TypingError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Sleep for `duration`, or return early with [`TypingError::Cancelled`]
    /// if cancellation fires first. Checks cancellation both before and
    /// after the sleep, per the executor's suspension-point contract.
    pub async fn sleep(&self, duration: Duration) -> Result<(), TypingError> {
        self.check()?;
        if duration.is_zero() {
            return self.check();
        }
        tokio::select! {
            () = tokio::time::sleep(duration) => {}
            () = self.notify.notified() => {}
        }
        self.check()
    }

    /// Block until either `notified()` fires (signalling e.g. a pause-latch
    /// resume) or cancellation fires, whichever comes first.
    pub async fn wait_for(&self, notify: &Notify) -> Result<(), TypingError> {
        self.check()?;
        tokio::select! {
            () = notify.notified() => {}
            () = self.notify.notified() => {}
        }
        self.check()
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sleep_completes_when_not_cancelled() {
        let token = CancelToken::new();
        assert!(token.sleep(Duration::from_millis(1)).await.is_ok());
    }

    #[tokio::test]
    async fn sleep_fails_fast_once_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        assert!(matches!(
            token.sleep(Duration::from_secs(30)).await,
            Err(TypingError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn cancel_wakes_a_pending_sleep() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move { waiter.sleep(Duration::from_secs(30)).await });
        tokio::time::sleep(Duration::from_millis(5)).await;
        token.cancel();
        let result = tokio::time::timeout(Duration::from_millis(200), handle)
            .await
            .expect("cancellation should wake the sleeper promptly")
            .unwrap();
        assert!(matches!(result, Err(TypingError::Cancelled)));
    }
}
