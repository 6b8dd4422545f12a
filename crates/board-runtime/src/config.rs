//! Board runtime configuration

use std::time::Duration;

/// Default delay between the last local mutation and the canvas save
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1200);

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Delay after the last local mutation before a canvas save fires
    pub debounce: Duration,
}

impl BoardConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a custom debounce window
    #[inline]
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}
