//! Rate limiter adapters.
//!
//! - `RateLimitedExecutor` - Queues operations beyond a per-period quota and
//!   flushes them in order as periods refresh
//!
//! ## Usage
//!
//! ```ignore
//! use cycle_time_tracker::adapters::rate_limiter::{RateLimitConfig, RateLimitedExecutor};
//!
//! let executor = RateLimitedExecutor::new(RateLimitConfig::default());
//! let actions = executor.execute(|| source.fetch_actions(&card_id)).await;
//! ```

mod config;
mod executor;

pub use config::RateLimitConfig;
pub use executor::RateLimitedExecutor;
