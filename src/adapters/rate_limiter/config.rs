//! Rate limit configuration types.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::ValidationError;

/// Quota applied to outbound board API operations.
///
/// Defaults to 50 operations per 10 second period, inside the board API's
/// per-token allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum operations started within one period.
    #[serde(default = "default_max_operations")]
    pub max_operations_per_period: u32,

    /// Period length in milliseconds.
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,
}

impl RateLimitConfig {
    pub fn new(max_operations_per_period: u32, period: Duration) -> Self {
        Self {
            max_operations_per_period,
            period_ms: period.as_millis() as u64,
        }
    }

    /// Get the period as Duration
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_operations_per_period == 0 {
            return Err(ValidationError::not_positive(
                "max_operations_per_period",
                0.0,
                0.0,
            ));
        }
        if self.period_ms == 0 {
            return Err(ValidationError::not_positive("period_ms", 0.0, 0.0));
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_operations_per_period: default_max_operations(),
            period_ms: default_period_ms(),
        }
    }
}

fn default_max_operations() -> u32 {
    50
}

fn default_period_ms() -> u64 {
    10_000
}
