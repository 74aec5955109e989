//! Settings adapters.
//!
//! - `InMemorySettingsProvider` - Per-board settings held in memory

mod in_memory_settings_provider;

pub use in_memory_settings_provider::InMemorySettingsProvider;
