//! Observable events published by [`super::TypingEngine`] (`§6`).

use serde::{Deserialize, Serialize};

/// Severity of a [`EngineEvent::DebugLog`] entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// Fine-grained trace detail.
    Debug,
    /// Notable but routine state transitions.
    Info,
    /// Recoverable problems (a downgraded clipboard verify, etc.).
    Warn,
}

/// One structured log entry published alongside `tracing`'s own output, for
/// UI consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugLogEntry {
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: String,
}

/// Events broadcast by the engine over its `tokio::sync::broadcast` channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// The pause/active state changed.
    PauseStateChanged {
        /// Whether the executor is currently paused.
        is_paused: bool,
        /// Whether a run is currently active at all.
        is_active: bool,
    },
    /// Resume countdown tick; `None` means the countdown ended (resumed or cancelled).
    ResumeCountdown(Option<u32>),
    /// A structured log entry.
    DebugLog(DebugLogEntry),
}
