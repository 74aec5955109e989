//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the cycle time engine and the outside world. Adapters implement these ports.
//!
//! - `HistorySource` - Board columns and card histories
//! - `SettingsProvider` - Per-board settings records
//! - `Renderer` - Displays card markings
//! - `TimestampStore` - Persists card timestamps per board

mod history_source;
mod renderer;
mod settings_provider;
mod timestamp_store;

pub use history_source::{HistoryError, HistorySource};
pub use renderer::{RenderError, Renderer};
pub use settings_provider::{SettingsError, SettingsProvider};
pub use timestamp_store::{StorageScope, TimestampStore, TimestampStoreError, STORAGE_NAMESPACE};
