//! Card history events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::ColumnRef;

/// Movement of a card from one column to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransition {
    pub list_before: ColumnRef,
    pub list_after: ColumnRef,
}

/// One entry of a card's change history.
///
/// Histories are delivered newest first. Events that are not column moves
/// (card creation, renames, ...) carry no transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub timestamp: Timestamp,
    #[serde(default)]
    pub transition: Option<ListTransition>,
}

impl ActionEvent {
    /// An event that moved the card between columns.
    pub fn moved(timestamp: Timestamp, list_before: ColumnRef, list_after: ColumnRef) -> Self {
        Self {
            timestamp,
            transition: Some(ListTransition {
                list_before,
                list_after,
            }),
        }
    }

    /// An event that did not move the card.
    pub fn untransitioned(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            transition: None,
        }
    }
}
