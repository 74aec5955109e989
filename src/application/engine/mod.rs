//! Cycle engine - polls the board and keeps card timestamps current.
//!
//! - `CycleEngine` - Poll loop, control surface and per-column completion barrier
//! - `EngineConfig` - Poll interval and severity thresholds
//! - `PollOutcome` / `PollStats` - What a single poll did

mod config;
mod cycle_engine;
mod outcome;

pub use config::EngineConfig;
pub use cycle_engine::CycleEngine;
pub use outcome::{PollOutcome, PollStats};
