//! Application layer - Orchestrates the domain over the ports.
//!
//! The cycle engine is the only service: it reads the board through a
//! `HistorySource`, keeps the `TimestampStore` current and tells the
//! `Renderer` what to show.

pub mod engine;

pub use engine::{CycleEngine, EngineConfig, PollOutcome, PollStats};
