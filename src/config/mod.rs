//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CYCLE_TIME_TRACKER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use cycle_time_tracker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Polling every {:?}", config.tracker.poll_interval());
//! ```

mod board;
mod error;
mod severity;
mod storage;
mod tracker;
mod trello;

pub use board::BoardConfig;
pub use error::{ConfigError, ValidationError};
pub use severity::SeverityConfig;
pub use storage::StorageConfig;
pub use tracker::TrackerConfig;
pub use trello::TrelloApiConfig;

use serde::Deserialize;

use crate::adapters::rate_limiter::RateLimitConfig;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Board to track, poll cadence and logging
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Initial settings of the tracked board
    #[serde(default)]
    pub board: BoardConfig,

    /// Quota for board API calls
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Severity ratio boundaries
    #[serde(default)]
    pub severity: SeverityConfig,

    /// Timestamp persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Trello API access
    #[serde(default)]
    pub trello: TrelloApiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CYCLE_TIME_TRACKER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CYCLE_TIME_TRACKER__TRACKER__BOARD_ID=WiNIc9tP` -> `tracker.board_id = WiNIc9tP`
    /// - `CYCLE_TIME_TRACKER__RATE_LIMIT__PERIOD_MS=10000` -> `rate_limit.period_ms = 10000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CYCLE_TIME_TRACKER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first section that is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tracker.validate()?;
        self.board.validate()?;
        self.rate_limit
            .validate()
            .map_err(ValidationError::in_section("rate_limit"))?;
        self.severity.validate()?;
        self.storage.validate()?;
        self.trello.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use std::time::Duration;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("CYCLE_TIME_TRACKER__TRACKER__BOARD_ID", "WiNIc9tP");
        env::set_var("CYCLE_TIME_TRACKER__TRELLO__API_KEY", "key");
        env::set_var("CYCLE_TIME_TRACKER__TRELLO__TOKEN", "token");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("CYCLE_TIME_TRACKER__TRACKER__BOARD_ID");
        env::remove_var("CYCLE_TIME_TRACKER__TRELLO__API_KEY");
        env::remove_var("CYCLE_TIME_TRACKER__TRELLO__TOKEN");
        env::remove_var("CYCLE_TIME_TRACKER__TRACKER__POLL_INTERVAL_SECS");
        env::remove_var("CYCLE_TIME_TRACKER__RATE_LIMIT__MAX_OPERATIONS_PER_PERIOD");
        env::remove_var("CYCLE_TIME_TRACKER__SEVERITY__HIGH_RATIO");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.tracker.board_id, "WiNIc9tP");
        assert_eq!(config.trello.api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.tracker.poll_interval(), Duration::from_secs(15));
        assert_eq!(config.rate_limit.max_operations_per_period, 50);
        assert_eq!(config.rate_limit.period(), Duration::from_secs(10));
        assert_eq!(config.severity.high_ratio, 0.9);
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CYCLE_TIME_TRACKER__TRACKER__POLL_INTERVAL_SECS", "30");
        env::set_var(
            "CYCLE_TIME_TRACKER__RATE_LIMIT__MAX_OPERATIONS_PER_PERIOD",
            "10",
        );
        env::set_var("CYCLE_TIME_TRACKER__SEVERITY__HIGH_RATIO", "0.75");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.tracker.poll_interval_secs, 30);
        assert_eq!(config.rate_limit.max_operations_per_period, 10);
        assert_eq!(config.severity.high_ratio, 0.75);
    }

    #[test]
    fn test_missing_board_fails_validation() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("TRACKER__BOARD_ID"))
        ));
    }

    #[test]
    fn test_zero_quota_fails_validation() {
        let mut config = AppConfig::default();
        config.tracker.board_id = "board".to_string();
        config.rate_limit.max_operations_per_period = 0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSection {
                section: "rate_limit",
                ..
            })
        ));
    }
}
