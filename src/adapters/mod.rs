//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the cycle time engine to external systems:
//! - `rate_limiter` - Quota-bounded executor for outbound calls
//! - `render` - Card marking renderers (in-memory, tracing)
//! - `settings` - Board settings providers
//! - `storage` - Timestamp stores (file, in-memory)
//! - `trello` - Board history over the Trello REST API

pub mod rate_limiter;
pub mod render;
pub mod settings;
pub mod storage;
pub mod trello;

pub use rate_limiter::{RateLimitConfig, RateLimitedExecutor};
pub use render::{InMemoryRenderer, TracingRenderer};
pub use settings::InMemorySettingsProvider;
pub use storage::{FileTimestampStore, InMemoryTimestampStore};
pub use trello::{TrelloConfig, TrelloHistorySource};
