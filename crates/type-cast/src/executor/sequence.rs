//! Ephemeral per-run tracking of correction/fix-session state and recent
//! keystroke history, used to decide extra stabilization delays.

use crate::types::{KeyName, PauseReason, TypingStep};

/// Executor-local state that doesn't survive past a single `execute()` call.
#[derive(Debug, Clone, Default)]
pub struct SequenceContext {
    /// True from the first correction/fix pause until a sequence-end condition fires.
    pub in_correction_sequence: bool,
    /// True once the current correction sequence is specifically a fix session.
    pub in_fix_session: bool,
    /// Consecutive `BACKSPACE` steps seen since the last non-backspace step.
    pub consecutive_backspaces: u32,
    /// True if the most recently dispatched step was a navigation key.
    pub last_was_navigation: bool,
    /// True if the most recently dispatched step was a `BACKSPACE`.
    pub last_was_backspace: bool,
    /// Ring buffer of the last two typed characters, most recent last.
    pub last_typed_chars: [Option<char>; 2],
    /// Count of `Char` steps seen since the last non-`Char` step.
    pub chars_since_last_non_char: u32,
    /// True once the pre-sequence stabilization delay has already fired for
    /// the sequence currently in progress.
    pub pre_sequence_delay_applied: bool,
}

impl SequenceContext {
    /// A context with no history, as at the start of a run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the last two typed characters are identical and there have
    /// been at least two `Char` steps since the last non-`Char` step — the
    /// condition that requires an extra settle before backspacing one away.
    #[must_use]
    pub const fn is_double_char_backspace(&self) -> bool {
        matches!(
            self.last_typed_chars,
            [Some(a), Some(b)] if a == b
        ) && self.chars_since_last_non_char >= 2
    }

    /// Record a typed character, updating the ring buffer and run counter.
    pub fn note_char(&mut self, ch: char) {
        self.last_typed_chars = [self.last_typed_chars[1], Some(ch)];
        self.chars_since_last_non_char += 1;
        self.last_was_navigation = false;
        self.last_was_backspace = false;
        self.consecutive_backspaces = 0;
    }

    /// Record an `ENTER`, which resets all char-run tracking (`§4.4`).
    pub fn note_enter(&mut self) {
        self.last_typed_chars = [None, None];
        self.chars_since_last_non_char = 0;
        self.last_was_navigation = false;
        self.last_was_backspace = false;
        self.consecutive_backspaces = 0;
    }

    /// Record a `BACKSPACE`.
    pub fn note_backspace(&mut self) {
        self.last_was_backspace = true;
        self.last_was_navigation = false;
        self.consecutive_backspaces += 1;
        self.chars_since_last_non_char = 0;
    }

    /// Record a navigation key other than `BACKSPACE`.
    pub fn note_navigation(&mut self) {
        self.last_was_navigation = true;
        self.last_was_backspace = false;
        self.consecutive_backspaces = 0;
        self.chars_since_last_non_char = 0;
    }

    /// Enter a correction sequence for a pause tagged `reason`, returning
    /// `true` the first time the sequence is entered (the caller should
    /// apply the one-time pre-sequence settle delay in that case).
    pub fn enter_sequence_if_needed(&mut self, reason: &PauseReason) -> bool {
        if !reason.starts_correction_sequence() {
            return false;
        }
        let first_entry = !self.in_correction_sequence;
        self.in_correction_sequence = true;
        if reason.is_fix_session() {
            self.in_fix_session = true;
        }
        if first_entry {
            self.pre_sequence_delay_applied = true;
            return true;
        }
        false
    }

    /// Check whether dispatching `key` (with the given lookahead at the next
    /// step) should clear the correction-sequence flags (`§4.4` sequence-end
    /// detection). Returns `true` if it did.
    pub fn maybe_end_sequence(&mut self, key: KeyName, next_is_sequence_continuation: bool) -> bool {
        if !self.in_correction_sequence || !key.is_end_jump() || next_is_sequence_continuation {
            return false;
        }
        self.in_correction_sequence = false;
        self.in_fix_session = false;
        self.pre_sequence_delay_applied = false;
        true
    }
}

/// Whether an end-jump key's lookahead at `next` means the correction
/// sequence continues rather than ends (`§4.4` sequence-end detection): a
/// `Key` step (e.g. the `LEFT`/`BACKSPACE` run inside a fix session's body)
/// always continues it; absent, a plain `Char`, or a Pause that doesn't
/// itself start a sequence all end it.
#[must_use]
pub fn sequence_continues_after(next: Option<&TypingStep>) -> bool {
    match next {
        None | Some(TypingStep::Char { .. }) => false,
        Some(TypingStep::Key { .. }) => true,
        Some(TypingStep::Pause { reason, .. }) => reason.starts_correction_sequence(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn double_char_backspace_requires_two_identical_and_a_run_of_two() {
        let mut ctx = SequenceContext::new();
        ctx.note_char('t');
        assert!(!ctx.is_double_char_backspace());
        ctx.note_char('t');
        assert!(ctx.is_double_char_backspace());
    }

    #[test]
    fn enter_sequence_fires_once() {
        let mut ctx = SequenceContext::new();
        assert!(ctx.enter_sequence_if_needed(&PauseReason::Correction));
        assert!(!ctx.enter_sequence_if_needed(&PauseReason::Correction));
        assert!(ctx.in_correction_sequence);
    }

    #[test]
    fn fix_session_reason_sets_fix_flag() {
        let mut ctx = SequenceContext::new();
        ctx.enter_sequence_if_needed(&PauseReason::FixSessionStart);
        assert!(ctx.in_fix_session);
    }

    #[test]
    fn ctrl_end_not_followed_by_more_corrections_ends_sequence() {
        let mut ctx = SequenceContext::new();
        ctx.enter_sequence_if_needed(&PauseReason::FixSessionStart);
        assert!(ctx.maybe_end_sequence(KeyName::CtrlEnd, false));
        assert!(!ctx.in_correction_sequence);
        assert!(!ctx.in_fix_session);
    }

    #[test]
    fn a_key_after_an_end_jump_continues_the_sequence() {
        // The fix session's opening CTRL_END is immediately followed by a
        // LEFT/BACKSPACE run, not a Pause — the sequence must not end here.
        let next = TypingStep::Key {
            key: KeyName::Left,
            delay_after: Duration::ZERO,
        };
        assert!(sequence_continues_after(Some(&next)));
    }

    #[test]
    fn a_fix_session_end_pause_after_an_end_jump_ends_the_sequence() {
        let next = TypingStep::Pause {
            duration: Duration::ZERO,
            reason: PauseReason::FixSessionEnd,
        };
        assert!(!sequence_continues_after(Some(&next)));
    }

    #[test]
    fn a_plain_char_after_an_end_jump_ends_the_sequence() {
        let next = TypingStep::Char {
            ch: 'a',
            delay_after: Duration::ZERO,
        };
        assert!(!sequence_continues_after(Some(&next)));
    }

    #[test]
    fn no_next_step_ends_the_sequence() {
        assert!(!sequence_continues_after(None));
    }

    #[test]
    fn reflex_pause_does_not_start_a_sequence() {
        let mut ctx = SequenceContext::new();
        assert!(!ctx.enter_sequence_if_needed(&PauseReason::Reflex));
        assert!(!ctx.in_correction_sequence);
    }
}
