//! Tracker runtime configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::foundation::BoardId;

use super::error::ValidationError;

/// Tracker configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Board whose cards are tracked
    #[serde(default)]
    pub board_id: String,

    /// Seconds between background polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,
}

impl TrackerConfig {
    /// Get the poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Parsed board id
    pub fn board_id(&self) -> Result<BoardId, ValidationError> {
        BoardId::new(self.board_id.as_str())
            .map_err(|_| ValidationError::MissingRequired("TRACKER__BOARD_ID"))
    }

    /// Validate tracker configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.board_id()?;
        if self.poll_interval_secs == 0 {
            return Err(ValidationError::InvalidPollInterval);
        }
        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            board_id: String::new(),
            poll_interval_secs: default_poll_interval(),
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_poll_interval() -> u64 {
    15
}

fn default_log_level() -> String {
    "info,cycle_time_tracker=debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_config_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(15));
        assert!(!config.json_logs);
        assert!(config.log_level.contains("cycle_time_tracker"));
    }

    #[test]
    fn test_validation_requires_board_id() {
        let config = TrackerConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));

        let config = TrackerConfig {
            board_id: "WiNIc9tP".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_poll_interval() {
        let config = TrackerConfig {
            board_id: "WiNIc9tP".to_string(),
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPollInterval)
        ));
    }
}
