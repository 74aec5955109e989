//! Settings Provider Port - Per-board settings records.

use async_trait::async_trait;

use crate::domain::board::BoardSettings;
use crate::domain::foundation::BoardId;

/// Errors that can occur while reading or writing settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings storage unavailable: {0}")]
    Unavailable(String),
}

/// Port for the settings record of each board.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Load the settings of a board.
    ///
    /// Boards that were never configured get [`BoardSettings::default`].
    async fn load(&self, board_id: &BoardId) -> Result<BoardSettings, SettingsError>;

    /// Replace the settings of a board.
    async fn save(&self, board_id: &BoardId, settings: &BoardSettings) -> Result<(), SettingsError>;
}
