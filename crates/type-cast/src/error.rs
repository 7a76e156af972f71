//! Error types for the typing engine.
//!
//! `BufferWarning` from the specification's error taxonomy is deliberately
//! not a variant here: it is non-fatal by definition (a telemetry signal,
//! not a fault — see [`crate::executor::shadow_buffer::ShadowBuffer::warnings`]),
//! so it is represented as a counter rather than something that can be
//! returned as an `Err`.

use std::time::Duration;

use thiserror::Error;

/// The error type for typing-engine operations.
#[derive(Debug, Error)]
pub enum TypingError {
    /// The planner rejected the supplied [`crate::config::TypingOptions`]
    /// before emitting any step.
    #[error("invalid typing options: {message}")]
    InvalidOptions {
        /// Description of what's wrong with the options.
        message: String,
    },

    /// The keystroke helper failed in a way that aborts the current run.
    #[error("keystroke helper failed: {0}")]
    Helper(#[from] HelperError),

    /// The caller cancelled the run. Expected, not logged as an error.
    #[error("operation was cancelled")]
    Cancelled,

    /// The clipboard verify-and-rewrite stage failed outright (as opposed to
    /// downgrading to best-effort, which is not an error).
    #[error("clipboard operation failed: {0}")]
    Clipboard(String),

    /// `start()` was called while a run was already active.
    #[error("another typing run is already active")]
    AlreadyRunning,
}

/// Errors from the helper subprocess and its client.
#[derive(Debug, Error)]
pub enum HelperError {
    /// The helper process could not be spawned.
    #[error("failed to spawn keystroke helper: {0}")]
    Spawn(#[source] std::io::Error),

    /// The helper process exited or its stdio closed mid-run.
    #[error("keystroke helper process is gone")]
    Gone,

    /// A single command did not ack within the configured timeout.
    #[error("command ack timed out after {elapsed:?}")]
    AckTimeout {
        /// How long the client waited before giving up.
        elapsed: Duration,
    },

    /// The helper returned `ERR` for a command.
    #[error("keystroke helper returned ERR for: {line}")]
    AckError {
        /// The command line that was rejected.
        line: String,
    },

    /// An I/O error occurred talking to the helper's stdio.
    #[error("helper I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` for typing-engine operations.
pub type Result<T> = std::result::Result<T, TypingError>;

impl TypingError {
    /// Create an `InvalidOptions` error.
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    /// True if this is a `Cancelled` error.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// True if this error means the helper process itself is unusable.
    #[must_use]
    pub const fn is_helper_gone(&self) -> bool {
        matches!(self, Self::Helper(HelperError::Gone))
    }
}

impl HelperError {
    /// Create a `Spawn` error.
    pub fn spawn(source: std::io::Error) -> Self {
        Self::Spawn(source)
    }

    /// Create an `AckTimeout` error.
    #[must_use]
    pub const fn ack_timeout(elapsed: Duration) -> Self {
        Self::AckTimeout { elapsed }
    }

    /// Create an `AckError` error.
    pub fn ack_error(line: impl Into<String>) -> Self {
        Self::AckError { line: line.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_options_message() {
        let err = TypingError::invalid_options("wpm must be > 0");
        assert!(err.to_string().contains("wpm must be > 0"));
    }

    #[test]
    fn helper_gone_detection() {
        let err: TypingError = HelperError::Gone.into();
        assert!(err.is_helper_gone());
        assert!(!TypingError::Cancelled.is_helper_gone());
    }

    #[test]
    fn cancelled_detection() {
        assert!(TypingError::Cancelled.is_cancelled());
    }
}
