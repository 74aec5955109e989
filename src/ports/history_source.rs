//! History Source Port - Interface to the external board.
//!
//! Provides the board's columns (with their cards) and each card's change
//! history. The engine only ever calls these through the rate-limited
//! executor.

use async_trait::async_trait;

use crate::domain::board::{ActionEvent, Column};
use crate::domain::foundation::{BoardId, CardId};

/// Errors that can occur while reading from the board.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Request to board API failed: {0}")]
    Transport(String),

    #[error("Board API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode board API response: {0}")]
    Decode(String),

    #[error("Not authorized to read board data")]
    Unauthorized,
}

/// Port for reading board structure and card histories.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Fetch every column of a board together with the cards it holds.
    async fn fetch_columns(&self, board_id: &BoardId) -> Result<Vec<Column>, HistoryError>;

    /// Fetch a card's history, newest event first.
    async fn fetch_actions(&self, card_id: &CardId) -> Result<Vec<ActionEvent>, HistoryError>;
}
