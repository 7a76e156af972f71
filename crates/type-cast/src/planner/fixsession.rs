//! Deferred batch correction ("fix session") emission.

use std::time::Duration;

use rand::{Rng, RngCore};

use crate::types::{KeyName, PauseReason, TypingStep};

/// One error deferred into a pending fix session.
#[derive(Debug, Clone)]
pub struct FixEntry {
    /// Index into the simulated buffer where the wrong segment begins.
    pub start: usize,
    /// Number of wrong characters to delete.
    pub wrong_len: usize,
    /// The characters that should replace them.
    pub correct: Vec<char>,
}

/// Emit a complete fix session for `entries` (accumulated oldest-first),
/// updating `sim` (the planner's simulated buffer) and `caret` to match.
///
/// Entries are resolved from the one nearest the end of the buffer backward:
/// fixing the rightmost error first means earlier, more-leftward entries'
/// recorded positions never shift out from under us.
pub fn run_fix_session(
    entries: &[FixEntry],
    sim: &mut Vec<char>,
    caret: &mut usize,
    correction_delay_s: f32,
    rng: &mut dyn RngCore,
    steps: &mut Vec<TypingStep>,
) {
    let nav_delay = Duration::from_millis(20);

    steps.push(TypingStep::Pause {
        duration: Duration::from_secs_f32(correction_delay_s.max(0.05)),
        reason: PauseReason::FixSessionStart,
    });
    steps.push(TypingStep::Key {
        key: KeyName::CtrlEnd,
        delay_after: Duration::from_millis(30),
    });
    let mut nav_caret = sim.len();

    for entry in entries.iter().rev() {
        let resume_at = entry.start + entry.wrong_len;
        let left_count = nav_caret.saturating_sub(resume_at);
        for _ in 0..left_count {
            steps.push(TypingStep::Key {
                key: KeyName::Left,
                delay_after: nav_delay,
            });
        }
        nav_caret = resume_at;

        for _ in 0..entry.wrong_len {
            steps.push(TypingStep::Key {
                key: KeyName::Backspace,
                delay_after: nav_delay,
            });
            nav_caret -= 1;
            sim.remove(nav_caret);
        }

        for &ch in &entry.correct {
            steps.push(TypingStep::Char {
                ch,
                delay_after: nav_delay,
            });
            sim.insert(nav_caret, ch);
            nav_caret += 1;
        }
    }

    steps.push(TypingStep::Key {
        key: KeyName::CtrlEnd,
        delay_after: Duration::from_millis(30),
    });
    *caret = sim.len();
    steps.push(TypingStep::Pause {
        duration: Duration::from_millis(rng.random_range(80..220)),
        reason: PauseReason::FixSessionEnd,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn single_entry_restores_correct_text() {
        // Simulated buffer currently holds "thix quick" — 'x' at index 3
        // should be 'e' (typo planted while typing "the").
        let mut sim: Vec<char> = "thix quick".chars().collect();
        let mut caret = sim.len();
        let mut steps = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);

        let entries = vec![FixEntry {
            start: 3,
            wrong_len: 1,
            correct: vec!['e'],
        }];
        run_fix_session(&entries, &mut sim, &mut caret, 0.3, &mut rng, &mut steps);

        let result: String = sim.iter().collect();
        assert_eq!(result, "the quick");
        assert_eq!(caret, sim.len());
    }

    #[test]
    fn two_entries_resolve_right_to_left() {
        // "thiq quicj" should become "this quick": fix 'j' at the end first,
        // then 'q' earlier in the buffer, without the first fix shifting
        // the second entry's recorded position.
        let mut sim: Vec<char> = "thiq quicj".chars().collect();
        let mut caret = sim.len();
        let mut steps = Vec::new();
        let mut rng = StdRng::seed_from_u64(2);

        let entries = vec![
            FixEntry {
                start: 3,
                wrong_len: 1,
                correct: vec!['s'],
            },
            FixEntry {
                start: 9,
                wrong_len: 1,
                correct: vec!['k'],
            },
        ];
        run_fix_session(&entries, &mut sim, &mut caret, 0.3, &mut rng, &mut steps);

        let result: String = sim.iter().collect();
        assert_eq!(result, "this quick");
    }
}
