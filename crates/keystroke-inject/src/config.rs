//! Configuration for the keystroke-injection backend.

use std::time::Duration;

/// Configuration for a [`crate::traits::KeySynth`] backend.
///
/// # Example
///
/// ```
/// use keystroke_inject::InjectConfig;
/// use std::time::Duration;
///
/// let config = InjectConfig::builder()
///     .post_event_dwell(Duration::from_millis(3))
///     .build();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InjectConfig {
    /// Sleep inserted after every synthesized key so the OS input queue
    /// drains before the next command is dispatched.
    pub post_event_dwell: Duration,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            post_event_dwell: Duration::from_millis(2),
        }
    }
}

impl InjectConfig {
    /// Create a builder with default settings.
    #[must_use]
    pub fn builder() -> InjectConfigBuilder {
        InjectConfigBuilder::new()
    }
}

/// Builder for [`InjectConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InjectConfigBuilder {
    config: InjectConfig,
}

impl InjectConfigBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the post-event dwell.
    #[must_use]
    pub const fn post_event_dwell(mut self, dwell: Duration) -> Self {
        self.config.post_event_dwell = dwell;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> InjectConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dwell_is_a_few_ms() {
        let config = InjectConfig::default();
        assert!(config.post_event_dwell >= Duration::from_millis(1));
        assert!(config.post_event_dwell <= Duration::from_millis(10));
    }

    #[test]
    fn builder_overrides_dwell() {
        let config = InjectConfig::builder()
            .post_event_dwell(Duration::from_millis(5))
            .build();
        assert_eq!(config.post_event_dwell, Duration::from_millis(5));
    }
}
