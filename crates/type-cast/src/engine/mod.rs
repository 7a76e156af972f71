//! Owns the keystroke helper lifecycle for a single run: spawn, drive the
//! executor, optionally verify via clipboard, tear down (`§4.5`).

mod clipboard;
mod events;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, broadcast};

use crate::cancel::CancelToken;
use crate::config::{AdvancedTypingOptions, TypingOptions};
use crate::error::{Result, TypingError};
use crate::executor::{self, ExecutorConfig, Statistics, wire};
use crate::helper::{HelperClient, locate_helper};
use crate::pause::PauseLatch;
use crate::planner;
use crate::types::normalize_line_endings;

pub use events::{DebugLogEntry, EngineEvent, LogLevel};

/// Clipboard poll window for the verify stage (`§5`: 0.9-1.2 s).
const VERIFY_POLL_TIMEOUT: Duration = Duration::from_millis(1000);
/// Fixed cadence used when replaying the whole target as a rewrite fallback.
const REWRITE_CADENCE: Duration = Duration::from_millis(12);

/// The single-instance typing engine facade.
///
/// Only one run may be active at a time (`§5`: "one engine instance at a
/// time; concurrent starts are rejected").
pub struct TypingEngine {
    running: Arc<AtomicBool>,
    pause: Arc<PauseLatch>,
    cancel: Mutex<Option<CancelToken>>,
    resume_countdown: Arc<Mutex<Option<CancelToken>>>,
    events_tx: broadcast::Sender<EngineEvent>,
}

impl TypingEngine {
    /// Create a new, idle engine.
    #[must_use]
    pub fn new() -> Self {
        let (events_tx, _rx) = broadcast::channel(64);
        Self {
            running: Arc::new(AtomicBool::new(false)),
            pause: Arc::new(PauseLatch::new()),
            cancel: Mutex::new(None),
            resume_countdown: Arc::new(Mutex::new(None)),
            events_tx,
        }
    }

    /// Subscribe to the engine's event stream.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events_tx.subscribe()
    }

    /// Whether a run is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn publish(&self, event: EngineEvent) {
        let _ = self.events_tx.send(event);
    }

    /// Spawn the helper, plan `text` under `options`, drive the executor,
    /// and (if configured) verify-and-rewrite via the clipboard.
    ///
    /// Rejects with [`TypingError::AlreadyRunning`] if a run is already in
    /// progress.
    pub async fn start(&self, text: &str, options: &TypingOptions) -> Result<(String, Statistics)> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(TypingError::AlreadyRunning);
        }

        let result = self.run(text, options).await;

        self.running.store(false, Ordering::SeqCst);
        *self.cancel.lock().await = None;
        self.pause.resume();
        self.publish(EngineEvent::PauseStateChanged {
            is_paused: false,
            is_active: false,
        });
        result
    }

    async fn run(&self, text: &str, options: &TypingOptions) -> Result<(String, Statistics)> {
        let cancel = CancelToken::new();
        *self.cancel.lock().await = Some(cancel.clone());

        let plan = planner::plan_with_entropy(text, options)?;

        let helper_path = locate_helper();
        let client = HelperClient::spawn(&helper_path)
            .await
            .map_err(TypingError::Helper)?;

        let exec_config = ExecutorConfig::default();
        let outcome = executor::execute(&plan, &client, &cancel, &self.pause, &exec_config).await;

        let result = match outcome {
            Ok((typed_text, stats)) if options.advanced.final_verify_via_clipboard => {
                match verify_and_rewrite(&client, &plan.normalized_text, &options.advanced, &cancel).await {
                    Ok(()) => Ok((typed_text, stats)),
                    Err(err) => Err(err),
                }
            }
            other => other,
        };

        client.shutdown().await;
        result
    }

    /// Cancel the active run, if any. The helper is killed as part of the
    /// run's own teardown once the executor observes the cancellation.
    pub async fn stop(&self) {
        if let Some(token) = self.cancel.lock().await.as_ref() {
            token.cancel();
        }
    }

    /// Enter the paused state, cancelling any in-flight resume countdown.
    pub fn pause(&self) {
        if let Ok(mut guard) = self.resume_countdown.try_lock() {
            if let Some(token) = guard.take() {
                token.cancel();
            }
        }
        self.pause.pause();
        self.publish(EngineEvent::PauseStateChanged {
            is_paused: true,
            is_active: self.is_active(),
        });
    }

    /// Begin the 3-second cancellable resume countdown. Returns immediately;
    /// the countdown (and the eventual latch resume) runs in the background.
    /// Calling [`Self::pause`] again during the countdown cancels it and
    /// leaves the engine paused.
    pub fn resume(&self) {
        let pause = self.pause.clone();
        let running = self.running.clone();
        let events_tx = self.events_tx.clone();
        let resume_countdown = self.resume_countdown.clone();

        tokio::spawn(async move {
            let countdown_cancel = CancelToken::new();
            *resume_countdown.lock().await = Some(countdown_cancel.clone());

            for remaining in (1..=3u32).rev() {
                let _ = events_tx.send(EngineEvent::ResumeCountdown(Some(remaining)));
                if countdown_cancel.sleep(Duration::from_secs(1)).await.is_err() {
                    let _ = events_tx.send(EngineEvent::ResumeCountdown(None));
                    return;
                }
            }

            let _ = events_tx.send(EngineEvent::ResumeCountdown(None));
            pause.resume();
            let _ = events_tx.send(EngineEvent::PauseStateChanged {
                is_paused: false,
                is_active: running.load(Ordering::SeqCst),
            });
        });
    }
}

impl Default for TypingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Clipboard select-all/copy verify, with an optional select-all/retype
/// rewrite fallback on mismatch, up to `advanced.final_verify_max_attempts`
/// times. The previous clipboard value is restored on every exit path.
async fn verify_and_rewrite(
    client: &HelperClient,
    normalized_text: &str,
    advanced: &AdvancedTypingOptions,
    cancel: &CancelToken,
) -> Result<()> {
    for attempt in 1..=advanced.final_verify_max_attempts {
        let previous = clipboard::get_text();
        let sentinel = clipboard::sentinel();
        clipboard::set_text(&sentinel)?;

        client.send("^a").await.map_err(TypingError::Helper)?;
        client.send("^c").await.map_err(TypingError::Helper)?;

        let copied = clipboard::poll_for_change(&sentinel, VERIFY_POLL_TIMEOUT).await;
        let matches = copied
            .as_deref()
            .is_some_and(|text| normalize_line_endings(text) == normalized_text);

        if matches {
            clipboard::restore(previous.as_deref());
            return Ok(());
        }

        if !advanced.final_rewrite_on_mismatch {
            clipboard::restore(previous.as_deref());
            return Err(TypingError::Clipboard(
                "clipboard verify did not match typed text".to_string(),
            ));
        }

        client.send("^a").await.map_err(TypingError::Helper)?;
        for ch in normalized_text.chars() {
            cancel.sleep(REWRITE_CADENCE).await?;
            let line = if ch == '\n' {
                wire::encode_key(crate::types::KeyName::Enter).to_string()
            } else {
                wire::encode_char(ch)
            };
            client.send(&line).await.map_err(TypingError::Helper)?;
        }

        clipboard::restore(previous.as_deref());
        tracing::warn!(attempt, "clipboard verify mismatch, rewrote and retrying");
    }

    Err(TypingError::Clipboard(format!(
        "clipboard verify still mismatched after {} attempt(s)",
        advanced.final_verify_max_attempts
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn concurrent_start_is_rejected() {
        let engine = TypingEngine::new();
        engine.running.store(true, Ordering::SeqCst);
        let err = engine
            .start("hi", &TypingOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TypingError::AlreadyRunning));
    }

    #[test]
    fn new_engine_is_not_active() {
        assert!(!TypingEngine::new().is_active());
    }
}
