//! Storage Adapters
//!
//! Implementations of the TimestampStore port for persisting card timestamps.
//!
//! ## Available Adapters
//!
//! - **FileTimestampStore** - Stores each board's timestamps as a JSON file
//! - **InMemoryTimestampStore** - Stores serialized records in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileTimestampStore, InMemoryTimestampStore};
//!
//! // Production: file-based storage
//! let store = FileTimestampStore::new("./data/timestamps");
//!
//! // Testing: in-memory storage
//! let store = InMemoryTimestampStore::new();
//! ```

mod file_timestamp_store;
mod in_memory_timestamp_store;

pub use file_timestamp_store::FileTimestampStore;
pub use in_memory_timestamp_store::InMemoryTimestampStore;
