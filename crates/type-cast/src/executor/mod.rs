//! The executor: drives a [`TypingPlan`] against the keystroke helper while
//! maintaining a local [`ShadowBuffer`] mirror of the target application.

pub mod config;
pub mod shadow_buffer;
pub mod stats;
mod sequence;
pub(crate) mod wire;

use std::time::{Duration, Instant};

use crate::cancel::CancelToken;
use crate::error::{Result, TypingError};
use crate::helper::HelperClient;
use crate::pause::PauseLatch;
use crate::types::{KeyName, TypingPlan, TypingStep};

pub use config::ExecutorConfig;
pub use shadow_buffer::ShadowBuffer;
pub use stats::Statistics;
use sequence::SequenceContext;

/// Drive `plan` to completion against `client`, honoring `cancel` and
/// `pause` at every suspension point.
///
/// On success, returns the shadow buffer's final text (which, absent any
/// helper failure or cancellation, equals `plan.normalized_text`) plus
/// execution statistics. Any helper failure aborts the run outright — the
/// specification forbids retrying individual steps.
pub async fn execute(
    plan: &TypingPlan,
    client: &HelperClient,
    cancel: &CancelToken,
    pause: &PauseLatch,
    config: &ExecutorConfig,
) -> Result<(String, Statistics)> {
    let started = Instant::now();
    let mut shadow = ShadowBuffer::new();
    let mut seq = SequenceContext::new();
    let mut stats = Statistics::default();

    for (i, step) in plan.steps.iter().enumerate() {
        cancel.check()?;
        pause.gate(cancel).await?;

        stats.total_steps += 1;
        match step {
            TypingStep::Pause { duration, reason } => {
                stats.pause_count += 1;
                tracing::debug!(?reason, ?duration, "pause");
                if reason.starts_correction_sequence() {
                    tracing::info!(?reason, "entering correction sequence");
                }
                if seq.enter_sequence_if_needed(reason) {
                    cancel.sleep(config.pre_sequence_settle).await?;
                }
                cancel.sleep(*duration).await?;
            }

            TypingStep::Char { ch, delay_after } => {
                let settle = if seq.last_was_navigation {
                    config.navigation_settle
                } else if seq.last_was_backspace {
                    config.backspace_settle
                } else {
                    Duration::ZERO
                };
                cancel.sleep(settle).await?;

                let line = wire::encode_char(*ch);
                client.send(&line).await.map_err(TypingError::Helper)?;
                shadow.insert_char(*ch);
                shadow.assert_caret_valid();

                stats.char_typed += 1;
                cancel.sleep(*delay_after + config.min_key_delay).await?;
                seq.note_char(*ch);
            }

            TypingStep::Key { key, delay_after } => {
                dispatch_key(
                    *key,
                    *delay_after,
                    i,
                    plan,
                    client,
                    cancel,
                    config,
                    &mut shadow,
                    &mut seq,
                    &mut stats,
                )
                .await?;
            }
        }

        shadow.assert_caret_valid();
    }

    stats.total_time_ms = started.elapsed().as_millis() as u64;
    stats.warnings_count = shadow.warnings;
    Ok((shadow.text(), stats))
}

#[allow(clippy::too_many_arguments)]
async fn dispatch_key(
    key: KeyName,
    delay_after: Duration,
    index: usize,
    plan: &TypingPlan,
    client: &HelperClient,
    cancel: &CancelToken,
    config: &ExecutorConfig,
    shadow: &mut ShadowBuffer,
    seq: &mut SequenceContext,
    stats: &mut Statistics,
) -> Result<()> {
    let is_backspace = matches!(key, KeyName::Backspace);
    let is_nav_for_micro_delay = matches!(key, KeyName::Backspace | KeyName::Left | KeyName::Right);

    if seq.in_correction_sequence && is_nav_for_micro_delay {
        cancel.sleep(config.min_key_delay * 2).await?;
    }

    if is_backspace {
        if seq.is_double_char_backspace() {
            cancel.sleep(config.double_char_backspace_settle).await?;
        }
        if seq.consecutive_backspaces >= config.max_backspaces_before_pause {
            cancel.sleep(config.backspace_burst_pause).await?;
            seq.consecutive_backspaces = 0;
        }
    }

    client
        .send(wire::encode_key(key))
        .await
        .map_err(TypingError::Helper)?;

    match key {
        KeyName::Enter => {
            shadow.insert_newline();
            seq.note_enter();
        }
        KeyName::Backspace => {
            shadow.backspace();
            seq.note_backspace();
            stats.backspace_count += 1;
        }
        KeyName::Left | KeyName::Right | KeyName::Home | KeyName::End | KeyName::CtrlHome | KeyName::CtrlEnd => {
            shadow.apply_key(key);
            seq.note_navigation();
            stats.navigation_count += 1;
        }
    }

    let post_send = if seq.in_correction_sequence {
        delay_after.max(config.correction_min_delay)
    } else {
        delay_after
    };
    cancel.sleep(post_send).await?;

    if matches!(key, KeyName::CtrlHome | KeyName::CtrlEnd) {
        cancel.sleep(config.ctrl_nav_settle).await?;
    }

    if key.is_end_jump() {
        let next_continues = sequence::sequence_continues_after(plan.steps.get(index + 1));
        if seq.maybe_end_sequence(key, next_continues) {
            cancel.sleep(config.post_sequence_settle).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan_seeded;
    use crate::config::TypingOptions;

    // The executor's helper-I/O paths need a live subprocess and are covered
    // by the integration tests in `tests/`; these unit tests exercise the
    // pure shadow-buffer / sequence bookkeeping that `execute` builds on.

    #[test]
    fn statistics_default_to_zero() {
        assert_eq!(Statistics::default().total_steps, 0);
    }

    #[test]
    fn plan_replay_matches_shadow_buffer_semantics() {
        let options = TypingOptions::builder().error_rate(0.2).build();
        let generated = plan_seeded("hello, world!", &options, 9).unwrap();

        let mut shadow = ShadowBuffer::new();
        for step in &generated.steps {
            match step {
                TypingStep::Char { ch, .. } => shadow.insert_char(*ch),
                TypingStep::Key { key, .. } => shadow.apply_key(*key),
                TypingStep::Pause { .. } => {}
            }
        }
        assert_eq!(shadow.text(), generated.normalized_text);
    }
}
