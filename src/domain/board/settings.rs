//! Per-board tracking settings.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{ColumnId, ValidationError};

use super::ColumnRef;

/// Target cycle time applied to boards that have never been configured.
pub const DEFAULT_TARGET_CYCLE_TIME_MINUTES: f64 = 60.0;

/// Smallest target accepted once settings are normalized.
pub const MIN_TARGET_CYCLE_TIME_MINUTES: f64 = 1.0;

/// Settings snapshot for one board.
///
/// Field names serialize in camelCase so records written by the settings
/// popup can be read back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_target")]
    pub target_cycle_time_minutes: f64,

    #[serde(default)]
    pub cycle_time_related_columns: Vec<ColumnRef>,

    #[serde(default)]
    pub starting_column_id: Option<ColumnId>,
}

impl BoardSettings {
    /// Returns true if the column counts toward cycle time.
    pub fn is_tracked(&self, column_id: &ColumnId) -> bool {
        self.cycle_time_related_columns
            .iter()
            .any(|column| &column.id == column_id)
    }

    /// Returns true if at least one column is tracked.
    pub fn has_tracked_columns(&self) -> bool {
        !self.cycle_time_related_columns.is_empty()
    }

    /// Ids of the cycle-time related columns.
    pub fn tracked_column_ids(&self) -> HashSet<ColumnId> {
        self.cycle_time_related_columns
            .iter()
            .map(|column| column.id.clone())
            .collect()
    }

    /// Ids a card must leave to count as completed: the tracked columns plus
    /// the starting column, so a card moved straight from the starting column
    /// to a finished column still records an exit.
    pub fn exit_boundary_ids(&self) -> HashSet<ColumnId> {
        let mut ids = self.tracked_column_ids();
        if let Some(starting) = &self.starting_column_id {
            ids.insert(starting.clone());
        }
        ids
    }

    /// Validates the settings without changing them.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let target = self.target_cycle_time_minutes;
        if !target.is_finite() || target <= 0.0 {
            return Err(ValidationError::not_positive(
                "target_cycle_time_minutes",
                0.0,
                target,
            ));
        }
        Ok(())
    }

    /// Returns a copy that is safe to compute severities with.
    ///
    /// A non-positive or non-finite target is coerced to
    /// [`MIN_TARGET_CYCLE_TIME_MINUTES`].
    pub fn normalized(mut self) -> Self {
        if let Err(err) = self.validate() {
            tracing::warn!(
                error = %err,
                coerced_to = MIN_TARGET_CYCLE_TIME_MINUTES,
                "Invalid target cycle time, coercing to minimum"
            );
            self.target_cycle_time_minutes = MIN_TARGET_CYCLE_TIME_MINUTES;
        }
        self
    }
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            target_cycle_time_minutes: DEFAULT_TARGET_CYCLE_TIME_MINUTES,
            cycle_time_related_columns: Vec::new(),
            starting_column_id: None,
        }
    }
}

fn default_target() -> f64 {
    DEFAULT_TARGET_CYCLE_TIME_MINUTES
}
