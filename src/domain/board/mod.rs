//! Board module - the external board as the tracker sees it.
//!
//! Columns and the cards in them, the history events recorded for each card,
//! and the per-board settings that decide which columns are tracked.

mod action;
mod column;
mod settings;

pub use action::{ActionEvent, ListTransition};
pub use column::{Card, Column, ColumnRef, ColumnRole};
pub use settings::{
    BoardSettings, DEFAULT_TARGET_CYCLE_TIME_MINUTES, MIN_TARGET_CYCLE_TIME_MINUTES,
};
