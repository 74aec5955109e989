//! Cycle time module - pure computations over card histories.
//!
//! - `interpreter` - entry and exit instants from a newest-first history
//! - `timestamps` - the per-card instants and their persisted form
//! - `card_state` - per-poll card classification and render instructions
//! - `severity` / `label` - how elapsed time is judged and displayed

mod card_state;
mod interpreter;
mod label;
mod severity;
mod timestamps;

pub use card_state::{CardState, RenderInstruction, COMPLETED_LABEL_PREFIX};
pub use interpreter::{most_recent_entry_time, most_recent_exit_time};
pub use label::{elapsed_minutes, humanize_elapsed, humanize_hours};
pub use severity::{Severity, SeverityThresholds, DEFAULT_HIGH_RATIO, DEFAULT_MEDIUM_RATIO};
pub use timestamps::{revive_timestamp_map, CardTimestampMap, CardTimestamps};
