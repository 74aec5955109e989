//! Initial board settings for the headless binary

use serde::Deserialize;

use crate::domain::board::{BoardSettings, ColumnRef, DEFAULT_TARGET_CYCLE_TIME_MINUTES};
use crate::domain::foundation::ColumnId;

use super::error::ValidationError;

/// Settings the binary seeds its settings provider with
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Whether tracking starts enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Target cycle time in minutes
    #[serde(default = "default_target")]
    pub target_cycle_time_minutes: f64,

    /// Tracked column ids (comma-separated)
    pub tracked_columns: Option<String>,

    /// Column whose cards have their timestamps reset
    pub starting_column: Option<String>,
}

impl BoardConfig {
    /// Tracked column ids as a vector
    pub fn tracked_columns_list(&self) -> Vec<String> {
        self.tracked_columns
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Board settings described by this section
    pub fn settings(&self) -> Result<BoardSettings, ValidationError> {
        let cycle_time_related_columns = self
            .tracked_columns_list()
            .into_iter()
            .map(|id| ColumnId::new(id).map(|id| ColumnRef::new(id, String::new())))
            .collect::<Result<Vec<_>, _>>()
            .map_err(ValidationError::in_section("board"))?;

        let starting_column_id = self
            .starting_column
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| ColumnId::new(s.trim()))
            .transpose()
            .map_err(ValidationError::in_section("board"))?;

        let settings = BoardSettings {
            enabled: self.enabled,
            target_cycle_time_minutes: self.target_cycle_time_minutes,
            cycle_time_related_columns,
            starting_column_id,
        };
        settings
            .validate()
            .map_err(ValidationError::in_section("board"))?;

        Ok(settings)
    }

    /// Validate board configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.settings().map(|_| ())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            target_cycle_time_minutes: default_target(),
            tracked_columns: None,
            starting_column: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_target() -> f64 {
    DEFAULT_TARGET_CYCLE_TIME_MINUTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_config_defaults() {
        let settings = BoardConfig::default().settings().unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.target_cycle_time_minutes, 60.0);
        assert!(!settings.has_tracked_columns());
        assert!(settings.starting_column_id.is_none());
    }

    #[test]
    fn test_tracked_columns_parsing() {
        let config = BoardConfig {
            tracked_columns: Some("doing, review,,".to_string()),
            starting_column: Some("todo".to_string()),
            ..Default::default()
        };
        let settings = config.settings().unwrap();
        assert!(settings.is_tracked(&ColumnId::new("doing").unwrap()));
        assert!(settings.is_tracked(&ColumnId::new("review").unwrap()));
        assert_eq!(settings.cycle_time_related_columns.len(), 2);
        assert_eq!(
            settings.starting_column_id,
            Some(ColumnId::new("todo").unwrap())
        );
    }

    #[test]
    fn test_non_positive_target_rejected() {
        let config = BoardConfig {
            target_cycle_time_minutes: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSection { section: "board", .. })
        ));
    }
}
