//! Trello adapter.
//!
//! - `TrelloHistorySource` - Reads lists and card actions from the Trello REST API

mod dto;
mod trello_history_source;

pub use trello_history_source::{TrelloConfig, TrelloHistorySource, DEFAULT_BASE_URL};
