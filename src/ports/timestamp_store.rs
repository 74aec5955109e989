//! Timestamp Store Port - Interface for persisting card timestamps.
//!
//! Each board's timestamps are stored as one record under a
//! [`StorageScope`]. Saving replaces the whole record; callers read, modify
//! and write back the full map.

use async_trait::async_trait;
use std::fmt;

use crate::domain::cycle_time::CardTimestampMap;
use crate::domain::foundation::BoardId;

/// Namespace shared by every key this crate writes.
pub const STORAGE_NAMESPACE: &str = "@tctt";

/// Storage key for one board's timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageScope(String);

impl StorageScope {
    /// Scope holding the card timestamps of a board.
    pub fn card_timestamps(board_id: &BoardId) -> Self {
        Self(format!("{STORAGE_NAMESPACE}/card_timestamps/{board_id}"))
    }

    /// Returns the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur during timestamp storage operations
#[derive(Debug, thiserror::Error)]
pub enum TimestampStoreError {
    #[error("Failed to serialize timestamps: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize timestamps: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting and loading card timestamps.
#[async_trait]
pub trait TimestampStore: Send + Sync {
    /// Load the timestamps stored under `scope`.
    ///
    /// A scope that was never written loads as an empty map. Individual
    /// malformed entries are tolerated; only a failure to read the record
    /// itself is an error.
    async fn load(&self, scope: &StorageScope) -> Result<CardTimestampMap, TimestampStoreError>;

    /// Replace everything stored under `scope` with `timestamps`.
    async fn save(
        &self,
        scope: &StorageScope,
        timestamps: &CardTimestampMap,
    ) -> Result<(), TimestampStoreError>;

    /// Remove everything stored under `scope`.
    async fn clear(&self, scope: &StorageScope) -> Result<(), TimestampStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_is_namespaced_per_board() {
        let board = BoardId::new("WiNIc9tP").unwrap();
        let scope = StorageScope::card_timestamps(&board);
        assert_eq!(scope.as_str(), "@tctt/card_timestamps/WiNIc9tP");
    }

    #[test]
    fn different_boards_do_not_collide() {
        let a = StorageScope::card_timestamps(&BoardId::new("a").unwrap());
        let b = StorageScope::card_timestamps(&BoardId::new("b").unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn store_error_messages() {
        let err = TimestampStoreError::IoError("disk full".to_string());
        assert!(err.to_string().contains("disk full"));
    }
}
