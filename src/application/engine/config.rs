//! Engine configuration.

use std::time::Duration;

use crate::domain::cycle_time::SeverityThresholds;

/// Configuration for the CycleEngine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How often the background loop polls the board.
    pub poll_interval: Duration,

    /// Severity boundaries applied to every marking.
    pub thresholds: SeverityThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(15),
            thresholds: SeverityThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Create config with custom poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Create config with custom severity thresholds.
    pub fn with_thresholds(mut self, thresholds: SeverityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}
