//! In-Memory Settings Provider Adapter
//!
//! Holds settings records per board in memory. Boards without a record load
//! as [`BoardSettings::default`], matching how an unconfigured board behaves.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::board::BoardSettings;
use crate::domain::foundation::BoardId;
use crate::ports::{SettingsError, SettingsProvider};

/// In-memory settings provider
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsProvider {
    boards: Arc<RwLock<HashMap<BoardId, BoardSettings>>>,
}

impl InMemorySettingsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider seeded with one board's settings.
    pub fn with_board(board_id: BoardId, settings: BoardSettings) -> Self {
        let mut boards = HashMap::new();
        boards.insert(board_id, settings);
        Self {
            boards: Arc::new(RwLock::new(boards)),
        }
    }

    /// Get the number of configured boards
    pub async fn board_count(&self) -> usize {
        self.boards.read().await.len()
    }
}

#[async_trait]
impl SettingsProvider for InMemorySettingsProvider {
    async fn load(&self, board_id: &BoardId) -> Result<BoardSettings, SettingsError> {
        Ok(self
            .boards
            .read()
            .await
            .get(board_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, board_id: &BoardId, settings: &BoardSettings) -> Result<(), SettingsError> {
        self.boards
            .write()
            .await
            .insert(board_id.clone(), settings.clone());
        Ok(())
    }
}
