//! File-based Timestamp Store Adapter
//!
//! Stores each scope's timestamps as a JSON file on disk. Writes go to a
//! sibling temporary file and are renamed into place.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::cycle_time::{revive_timestamp_map, CardTimestampMap};
use crate::ports::{StorageScope, TimestampStore, TimestampStoreError};

/// File-based storage for card timestamps
#[derive(Debug, Clone)]
pub struct FileTimestampStore {
    base_path: PathBuf,
}

impl FileTimestampStore {
    /// Create a new file store with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileTimestampStore::new("./data/timestamps");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a scope
    ///
    /// ASCII letters, digits and `-` are kept; every other byte becomes
    /// `_XX` (hex), so distinct scopes never share a file.
    fn scope_file_path(&self, scope: &StorageScope) -> PathBuf {
        let mut file_name = String::with_capacity(scope.as_str().len());
        for byte in scope.as_str().bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                file_name.push(char::from(byte));
            } else {
                file_name.push_str(&format!("_{byte:02X}"));
            }
        }
        self.base_path.join(format!("{file_name}.json"))
    }

    /// Ensure directory exists
    async fn ensure_dir(&self) -> Result<(), TimestampStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| TimestampStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl TimestampStore for FileTimestampStore {
    async fn load(&self, scope: &StorageScope) -> Result<CardTimestampMap, TimestampStoreError> {
        let file_path = self.scope_file_path(scope);

        if !file_path.exists() {
            return Ok(CardTimestampMap::new());
        }

        let json = fs::read_to_string(&file_path)
            .await
            .map_err(|e| TimestampStoreError::IoError(e.to_string()))?;

        let raw: serde_json::Value = serde_json::from_str(&json)
            .map_err(|e| TimestampStoreError::DeserializationFailed(e.to_string()))?;

        Ok(revive_timestamp_map(&raw))
    }

    async fn save(
        &self,
        scope: &StorageScope,
        timestamps: &CardTimestampMap,
    ) -> Result<(), TimestampStoreError> {
        self.ensure_dir().await?;

        let json = serde_json::to_string_pretty(timestamps)
            .map_err(|e| TimestampStoreError::SerializationFailed(e.to_string()))?;

        let file_path = self.scope_file_path(scope);
        let tmp_path = file_path.with_extension("json.tmp");

        fs::write(&tmp_path, json)
            .await
            .map_err(|e| TimestampStoreError::IoError(e.to_string()))?;
        fs::rename(&tmp_path, &file_path)
            .await
            .map_err(|e| TimestampStoreError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self, scope: &StorageScope) -> Result<(), TimestampStoreError> {
        let file_path = self.scope_file_path(scope);

        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| TimestampStoreError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}
