//! Execution statistics returned alongside the final typed text.

use serde::{Deserialize, Serialize};

/// Counters accumulated over one `execute()` run (`§4.4`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Total plan steps processed (including pauses).
    pub total_steps: u64,
    /// Number of `Char` steps sent.
    pub char_typed: u64,
    /// Number of `BACKSPACE` keys sent.
    pub backspace_count: u64,
    /// Number of non-backspace navigation keys sent
    /// (`LEFT`/`RIGHT`/`HOME`/`END`/`CTRL_HOME`/`CTRL_END`).
    pub navigation_count: u64,
    /// Number of `Pause` steps processed.
    pub pause_count: u64,
    /// Total wall-clock time spent executing the plan, in milliseconds.
    pub total_time_ms: u64,
    /// Cumulative [`crate::executor::shadow_buffer::ShadowBuffer::warnings`]
    /// at the end of the run.
    pub warnings_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_zero() {
        let stats = Statistics::default();
        assert_eq!(stats.total_steps, 0);
        assert_eq!(stats.warnings_count, 0);
    }
}
