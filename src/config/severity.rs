//! Severity threshold configuration

use serde::Deserialize;

use crate::domain::cycle_time::{SeverityThresholds, DEFAULT_HIGH_RATIO, DEFAULT_MEDIUM_RATIO};

use super::error::ValidationError;

/// Ratios of elapsed to target time at which markings change severity
#[derive(Debug, Clone, Deserialize)]
pub struct SeverityConfig {
    #[serde(default = "default_medium_ratio")]
    pub medium_ratio: f64,

    #[serde(default = "default_high_ratio")]
    pub high_ratio: f64,
}

impl SeverityConfig {
    pub fn thresholds(&self) -> Result<SeverityThresholds, ValidationError> {
        SeverityThresholds::new(self.medium_ratio, self.high_ratio)
            .map_err(ValidationError::in_section("severity"))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.thresholds().map(|_| ())
    }
}

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            medium_ratio: default_medium_ratio(),
            high_ratio: default_high_ratio(),
        }
    }
}

fn default_medium_ratio() -> f64 {
    DEFAULT_MEDIUM_RATIO
}

fn default_high_ratio() -> f64 {
    DEFAULT_HIGH_RATIO
}
