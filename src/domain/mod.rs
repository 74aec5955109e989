//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, timestamps, errors)
//! - `board` - Columns, cards, history events and per-board settings
//! - `cycle_time` - Pure cycle time computations (entry/exit derivation,
//!   card classification, severity, labels)

pub mod board;
pub mod cycle_time;
pub mod foundation;
