//! Clipboard verify-and-rewrite support for the engine facade (`§4.5`).

use std::time::{Duration, Instant};

use crate::error::TypingError;

/// Read the current clipboard text, if any and if readable.
#[must_use]
pub fn get_text() -> Option<String> {
    arboard::Clipboard::new().ok()?.get_text().ok()
}

/// Overwrite the clipboard with `text`.
pub fn set_text(text: &str) -> Result<(), TypingError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|err| TypingError::Clipboard(err.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|err| TypingError::Clipboard(err.to_string()))
}

/// Restore a previously-saved clipboard value. Best-effort: a failure here
/// is swallowed, since it would otherwise mask the verify/rewrite result
/// that's actually being returned to the caller.
pub fn restore(previous: Option<&str>) {
    if let Some(text) = previous {
        let _ = set_text(text);
    }
}

/// Poll the clipboard until its text differs from `sentinel` or `timeout`
/// elapses, whichever comes first.
pub async fn poll_for_change(sentinel: &str, timeout: Duration) -> Option<String> {
    const POLL_INTERVAL: Duration = Duration::from_millis(50);
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(value) = get_text() {
            if value != sentinel {
                return Some(value);
            }
        }
        if Instant::now() >= deadline {
            return None;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// A fresh, effectively-unguessable sentinel value to distinguish "the
/// clipboard still holds what we just wrote" from "the target app copied
/// something back".
#[must_use]
pub fn sentinel() -> String {
    format!("type-cast-verify-{:016x}", rand::random::<u64>())
}
