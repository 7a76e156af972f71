//! Typing behavior configuration.

use serde::{Deserialize, Serialize};

use crate::error::TypingError;

/// Advanced tuning of error kinds and the final verification stage.
///
/// # Example
///
/// ```
/// use type_cast::config::AdvancedTypingOptions;
///
/// let advanced = AdvancedTypingOptions::builder()
///     .fix_session_probability(0.3)
///     .final_verify_via_clipboard(true)
///     .build();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvancedTypingOptions {
    /// Relative weight of the "double the character" typo kind.
    pub typo_double_weight: f32,
    /// Relative weight of the "transpose with the next character" typo kind.
    pub typo_transpose_weight: f32,
    /// Relative weight of the "substitute a QWERTY neighbor" typo kind.
    pub typo_nearby_key_weight: f32,
    /// Probability an error is deferred into a batched fix session instead
    /// of corrected immediately.
    pub fix_session_probability: f32,
    /// Verify the final typed text via a clipboard select-all/copy round-trip.
    pub final_verify_via_clipboard: bool,
    /// On a verify mismatch, select-all and retype the whole target.
    pub final_rewrite_on_mismatch: bool,
    /// Maximum verify+rewrite attempts (at least 1).
    pub final_verify_max_attempts: u32,
}

impl Default for AdvancedTypingOptions {
    fn default() -> Self {
        Self {
            typo_double_weight: 1.0,
            typo_transpose_weight: 1.0,
            typo_nearby_key_weight: 1.0,
            fix_session_probability: 0.15,
            final_verify_via_clipboard: false,
            final_rewrite_on_mismatch: false,
            final_verify_max_attempts: 1,
        }
    }
}

impl AdvancedTypingOptions {
    /// Create a builder seeded with the default options.
    #[must_use]
    pub fn builder() -> AdvancedTypingOptionsBuilder {
        AdvancedTypingOptionsBuilder::new()
    }

    /// Validate the ranges and bounds the specification requires.
    pub fn validate(&self) -> Result<(), TypingError> {
        for (name, weight) in [
            ("typoDoubleWeight", self.typo_double_weight),
            ("typoTransposeWeight", self.typo_transpose_weight),
            ("typoNearbyKeyWeight", self.typo_nearby_key_weight),
        ] {
            if weight < 0.0 {
                return Err(TypingError::invalid_options(format!(
                    "{name} must be non-negative, got {weight}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.fix_session_probability) {
            return Err(TypingError::invalid_options(format!(
                "fixSessionProbability must be in 0..=1, got {}",
                self.fix_session_probability
            )));
        }
        if self.final_verify_max_attempts < 1 {
            return Err(TypingError::invalid_options(
                "finalVerifyMaxAttempts must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Builder for [`AdvancedTypingOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvancedTypingOptionsBuilder {
    options: AdvancedTypingOptions,
}

impl AdvancedTypingOptionsBuilder {
    /// Create a new builder seeded with the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the doubled-letter typo weight.
    #[must_use]
    pub const fn typo_double_weight(mut self, weight: f32) -> Self {
        self.options.typo_double_weight = weight;
        self
    }

    /// Set the transpose typo weight.
    #[must_use]
    pub const fn typo_transpose_weight(mut self, weight: f32) -> Self {
        self.options.typo_transpose_weight = weight;
        self
    }

    /// Set the nearby-key typo weight.
    #[must_use]
    pub const fn typo_nearby_key_weight(mut self, weight: f32) -> Self {
        self.options.typo_nearby_key_weight = weight;
        self
    }

    /// Set the fix-session deferral probability.
    #[must_use]
    pub const fn fix_session_probability(mut self, probability: f32) -> Self {
        self.options.fix_session_probability = probability;
        self
    }

    /// Enable or disable the clipboard verify stage.
    #[must_use]
    pub const fn final_verify_via_clipboard(mut self, enabled: bool) -> Self {
        self.options.final_verify_via_clipboard = enabled;
        self
    }

    /// Enable or disable the rewrite-on-mismatch fallback.
    #[must_use]
    pub const fn final_rewrite_on_mismatch(mut self, enabled: bool) -> Self {
        self.options.final_rewrite_on_mismatch = enabled;
        self
    }

    /// Set the maximum number of verify+rewrite attempts.
    #[must_use]
    pub const fn final_verify_max_attempts(mut self, attempts: u32) -> Self {
        self.options.final_verify_max_attempts = attempts;
        self
    }

    /// Build the options.
    #[must_use]
    pub fn build(self) -> AdvancedTypingOptions {
        self.options
    }
}

/// Top-level behavioral profile for one [`crate::planner::plan`] call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypingOptions {
    /// Target words per minute (5 chars/word convention).
    pub wpm: f32,
    /// Jitter of inter-keystroke delay, in `0..=1`.
    pub variance: f32,
    /// Probability a character starts out as an error, in `0..=1`.
    pub error_rate: f32,
    /// Seconds to pause before correcting an immediate error.
    pub correction_delay: f32,
    /// Error-kind and final-verification tuning.
    pub advanced: AdvancedTypingOptions,
}

impl Default for TypingOptions {
    fn default() -> Self {
        Self {
            wpm: 60.0,
            variance: 0.3,
            error_rate: 0.04,
            correction_delay: 0.35,
            advanced: AdvancedTypingOptions::default(),
        }
    }
}

impl TypingOptions {
    /// Create a builder seeded with the default options.
    #[must_use]
    pub fn builder() -> TypingOptionsBuilder {
        TypingOptionsBuilder::new()
    }

    /// Validate the options, per the planner's `InvalidOptions` failure mode.
    ///
    /// Checked before any plan step is emitted, so a rejected call never
    /// produces a partial plan.
    pub fn validate(&self) -> Result<(), TypingError> {
        if self.wpm <= 0.0 {
            return Err(TypingError::invalid_options(format!(
                "wpm must be > 0, got {}",
                self.wpm
            )));
        }
        if !(0.0..=1.0).contains(&self.variance) {
            return Err(TypingError::invalid_options(format!(
                "variance must be in 0..=1, got {}",
                self.variance
            )));
        }
        if !(0.0..=1.0).contains(&self.error_rate) {
            return Err(TypingError::invalid_options(format!(
                "errorRate must be in 0..=1, got {}",
                self.error_rate
            )));
        }
        if self.correction_delay < 0.0 {
            return Err(TypingError::invalid_options(format!(
                "correctionDelay must be non-negative, got {}",
                self.correction_delay
            )));
        }
        self.advanced.validate()
    }
}

/// Builder for [`TypingOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TypingOptionsBuilder {
    options: TypingOptions,
}

impl TypingOptionsBuilder {
    /// Create a new builder seeded with the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target words per minute.
    #[must_use]
    pub const fn wpm(mut self, wpm: f32) -> Self {
        self.options.wpm = wpm;
        self
    }

    /// Set the inter-keystroke delay jitter.
    #[must_use]
    pub const fn variance(mut self, variance: f32) -> Self {
        self.options.variance = variance;
        self
    }

    /// Set the per-character error probability.
    #[must_use]
    pub const fn error_rate(mut self, rate: f32) -> Self {
        self.options.error_rate = rate;
        self
    }

    /// Set the immediate-correction pause, in seconds.
    #[must_use]
    pub const fn correction_delay(mut self, seconds: f32) -> Self {
        self.options.correction_delay = seconds;
        self
    }

    /// Replace the advanced options wholesale.
    #[must_use]
    pub const fn advanced(mut self, advanced: AdvancedTypingOptions) -> Self {
        self.options.advanced = advanced;
        self
    }

    /// Build the options.
    #[must_use]
    pub fn build(self) -> TypingOptions {
        self.options
    }
}

/// Canned [`TypingOptions`] presets for common typing-speed impressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingProfile {
    /// Hunt-and-peck.
    VerySlow,
    /// Careful beginner.
    Slow,
    /// An unremarkable typist.
    Normal,
    /// A confident, practiced typist.
    Fast,
    /// A touch typist at speed.
    VeryFast,
}

impl TypingProfile {
    /// Get the canned [`TypingOptions`] for this profile.
    #[must_use]
    pub fn options(self) -> TypingOptions {
        match self {
            Self::VerySlow => TypingOptions::builder()
                .wpm(18.0)
                .variance(0.5)
                .error_rate(0.08)
                .correction_delay(0.6)
                .build(),
            Self::Slow => TypingOptions::builder()
                .wpm(30.0)
                .variance(0.4)
                .error_rate(0.06)
                .correction_delay(0.45)
                .build(),
            Self::Normal => TypingOptions::default(),
            Self::Fast => TypingOptions::builder()
                .wpm(85.0)
                .variance(0.25)
                .error_rate(0.03)
                .correction_delay(0.25)
                .build(),
            Self::VeryFast => TypingOptions::builder()
                .wpm(120.0)
                .variance(0.15)
                .error_rate(0.02)
                .correction_delay(0.15)
                .build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert!(TypingOptions::default().validate().is_ok());
    }

    #[test]
    fn zero_wpm_is_invalid() {
        let options = TypingOptions::builder().wpm(0.0).build();
        assert!(options.validate().is_err());
    }

    #[test]
    fn out_of_range_variance_is_invalid() {
        let options = TypingOptions::builder().variance(1.5).build();
        assert!(options.validate().is_err());
    }

    #[test]
    fn zero_max_attempts_is_invalid() {
        let advanced = AdvancedTypingOptions::builder()
            .final_verify_max_attempts(0)
            .build();
        let options = TypingOptions::builder().advanced(advanced).build();
        assert!(options.validate().is_err());
    }

    #[test]
    fn profiles_slow_to_fast() {
        let slow = TypingProfile::Slow.options();
        let fast = TypingProfile::Fast.options();
        assert!(slow.wpm < fast.wpm);
    }
}
