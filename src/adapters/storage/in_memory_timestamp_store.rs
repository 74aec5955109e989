//! In-Memory Timestamp Store Adapter
//!
//! Keeps each scope's serialized JSON in memory. Records are stored in their
//! serialized form, so loads go through the same revival path as the file
//! store. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cycle_time::{revive_timestamp_map, CardTimestampMap};
use crate::ports::{StorageScope, TimestampStore, TimestampStoreError};

/// In-memory storage for card timestamps
#[derive(Debug, Clone, Default)]
pub struct InMemoryTimestampStore {
    records: Arc<RwLock<HashMap<StorageScope, String>>>,
}

impl InMemoryTimestampStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw serialized record, bypassing serialization (useful for tests)
    pub async fn insert_raw(&self, scope: &StorageScope, raw: impl Into<String>) {
        self.records.write().await.insert(scope.clone(), raw.into());
    }

    /// Get the raw serialized record of a scope
    pub async fn raw(&self, scope: &StorageScope) -> Option<String> {
        self.records.read().await.get(scope).cloned()
    }

    /// Get the number of stored scopes
    pub async fn scope_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl TimestampStore for InMemoryTimestampStore {
    async fn load(&self, scope: &StorageScope) -> Result<CardTimestampMap, TimestampStoreError> {
        let records = self.records.read().await;
        let Some(json) = records.get(scope) else {
            return Ok(CardTimestampMap::new());
        };

        let raw: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| TimestampStoreError::DeserializationFailed(e.to_string()))?;

        Ok(revive_timestamp_map(&raw))
    }

    async fn save(
        &self,
        scope: &StorageScope,
        timestamps: &CardTimestampMap,
    ) -> Result<(), TimestampStoreError> {
        let json = serde_json::to_string(timestamps)
            .map_err(|e| TimestampStoreError::SerializationFailed(e.to_string()))?;

        self.records.write().await.insert(scope.clone(), json);
        Ok(())
    }

    async fn clear(&self, scope: &StorageScope) -> Result<(), TimestampStoreError> {
        self.records.write().await.remove(scope);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle_time::CardTimestamps;
    use crate::domain::foundation::{BoardId, CardId, Timestamp};

    fn scope(board: &str) -> StorageScope {
        StorageScope::card_timestamps(&BoardId::new(board).unwrap())
    }

    fn sample_map() -> CardTimestampMap {
        let start = Timestamp::parse_rfc3339("2024-01-15T10:30:00Z").unwrap();
        let mut map = CardTimestampMap::new();
        map.insert(CardId::new("a").unwrap(), CardTimestamps::started(start));
        map
    }

    #[tokio::test]
    async fn test_memory_store_save_and_load() {
        let store = InMemoryTimestampStore::new();

        store.save(&scope("b1"), &sample_map()).await.unwrap();

        assert_eq!(store.load(&scope("b1")).await.unwrap(), sample_map());
        assert_eq!(store.scope_count().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_stores_serialized_form() {
        let store = InMemoryTimestampStore::new();

        store.save(&scope("b1"), &sample_map()).await.unwrap();

        let raw = store.raw(&scope("b1")).await.unwrap();
        assert!(raw.contains("\"startedAt\""));
        assert!(raw.contains("2024-01-15T10:30:00"));
    }

    #[tokio::test]
    async fn test_memory_store_missing_scope_loads_empty() {
        let store = InMemoryTimestampStore::new();
        assert!(store.load(&scope("b1")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_clear() {
        let store = InMemoryTimestampStore::new();
        store.save(&scope("b1"), &sample_map()).await.unwrap();
        store.save(&scope("b2"), &sample_map()).await.unwrap();

        store.clear(&scope("b1")).await.unwrap();

        assert!(store.load(&scope("b1")).await.unwrap().is_empty());
        assert_eq!(store.load(&scope("b2")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_revives_malformed_record_partially() {
        let store = InMemoryTimestampStore::new();
        store
            .insert_raw(
                &scope("b1"),
                r#"{"a": {"startedAt": 17}, "b": {"startedAt": "bad"}, "c": 3}"#,
            )
            .await;

        let loaded = store.load(&scope("b1")).await.unwrap();

        assert_eq!(loaded.len(), 2);
        assert!(loaded[&CardId::new("a").unwrap()].started_at.is_some());
        assert!(loaded[&CardId::new("b").unwrap()].is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_unparsable_record_is_an_error() {
        let store = InMemoryTimestampStore::new();
        store.insert_raw(&scope("b1"), "][").await;

        assert!(store.load(&scope("b1")).await.is_err());
    }
}
