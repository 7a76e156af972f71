//! Inter-keystroke delay timing model.

use std::time::Duration;

use rand::{Rng, RngCore};

/// Lower/upper jitter bounds as a multiple of the base delay.
const JITTER_MIN_MULTIPLIER: f32 = 0.3;
const JITTER_MAX_MULTIPLIER: f32 = 2.5;

/// Baseline inter-keystroke delay for a words-per-minute target, assuming
/// the standard 5-characters-per-word convention.
#[must_use]
pub fn base_delay_seconds(wpm: f32) -> f32 {
    60.0 / (wpm * 5.0)
}

/// Sample a jittered delay around `base`, with spread proportional to
/// `variance` (`0..=1`), clamped to a sensible multiplier range so a high
/// variance can't produce a negative or wildly large delay.
pub fn jittered_delay(base_seconds: f32, variance: f32, rng: &mut dyn RngCore) -> Duration {
    let spread = variance.clamp(0.0, 1.0);
    let offset: f32 = rng.random_range(-1.0..1.0) * spread;
    let multiplier = (1.0 + offset).clamp(JITTER_MIN_MULTIPLIER, JITTER_MAX_MULTIPLIER);
    Duration::from_secs_f32((base_seconds * multiplier).max(0.0))
}

/// A brief, frequent "thinking rhythm" pause.
pub fn rhythm_pause(rng: &mut dyn RngCore) -> Duration {
    Duration::from_millis(rng.random_range(15..60))
}

/// A longer pause at a sentence boundary.
pub fn sentence_boundary_pause(rng: &mut dyn RngCore) -> Duration {
    Duration::from_millis(rng.random_range(180..520))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn base_delay_scales_inversely_with_wpm() {
        assert!(base_delay_seconds(60.0) > base_delay_seconds(120.0));
    }

    #[test]
    fn jittered_delay_stays_in_clamped_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = base_delay_seconds(60.0);
        for _ in 0..200 {
            let delay = jittered_delay(base, 1.0, &mut rng).as_secs_f32();
            assert!(delay >= base * JITTER_MIN_MULTIPLIER - f32::EPSILON);
            assert!(delay <= base * JITTER_MAX_MULTIPLIER + f32::EPSILON);
        }
    }

    #[test]
    fn zero_variance_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let base = base_delay_seconds(60.0);
        let a = jittered_delay(base, 0.0, &mut rng).as_secs_f32();
        let b = jittered_delay(base, 0.0, &mut rng).as_secs_f32();
        assert!((a - b).abs() < f32::EPSILON);
        assert!((a - base).abs() < f32::EPSILON);
    }
}
