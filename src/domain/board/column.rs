//! Columns, cards and the role a column plays in the workflow.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CardId, ColumnId};

use super::BoardSettings;

/// Lightweight reference to a column, as carried by settings and history events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub id: ColumnId,
    #[serde(default)]
    pub name: String,
}

impl ColumnRef {
    pub fn new(id: ColumnId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A card as listed on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(default)]
    pub name: String,
}

impl Card {
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A column together with the cards currently sitting in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(id: ColumnId, name: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            id,
            name: name.into(),
            cards,
        }
    }

    /// Returns a reference to this column without its cards.
    pub fn column_ref(&self) -> ColumnRef {
        ColumnRef::new(self.id.clone(), self.name.clone())
    }
}

/// Role a column plays for the current settings snapshot.
///
/// Roles are recomputed on every poll and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Membership resets a card's timestamps.
    Starting,
    /// Time spent here counts toward cycle time.
    CycleTimeTracked,
    /// Anything else; cards here are considered finished.
    Other,
}

impl ColumnRole {
    /// Classifies a column against a settings snapshot.
    ///
    /// A column listed as cycle-time related wins over the starting column.
    pub fn classify(column_id: &ColumnId, settings: &BoardSettings) -> Self {
        if settings.is_tracked(column_id) {
            ColumnRole::CycleTimeTracked
        } else if settings.starting_column_id.as_ref() == Some(column_id) {
            ColumnRole::Starting
        } else {
            ColumnRole::Other
        }
    }

    /// Returns the string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Starting => "starting",
            ColumnRole::CycleTimeTracked => "cycle_time_tracked",
            ColumnRole::Other => "other",
        }
    }
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_id(id: &str) -> ColumnId {
        ColumnId::new(id).unwrap()
    }

    fn settings() -> BoardSettings {
        BoardSettings {
            enabled: true,
            target_cycle_time_minutes: 60.0,
            cycle_time_related_columns: vec![
                ColumnRef::new(column_id("doing"), "Doing"),
                ColumnRef::new(column_id("review"), "Review"),
            ],
            starting_column_id: Some(column_id("todo")),
        }
    }

    #[test]
    fn tracked_columns_classify_as_cycle_time_tracked() {
        let settings = settings();
        assert_eq!(
            ColumnRole::classify(&column_id("doing"), &settings),
            ColumnRole::CycleTimeTracked
        );
        assert_eq!(
            ColumnRole::classify(&column_id("review"), &settings),
            ColumnRole::CycleTimeTracked
        );
    }

    #[test]
    fn starting_column_classifies_as_starting() {
        assert_eq!(
            ColumnRole::classify(&column_id("todo"), &settings()),
            ColumnRole::Starting
        );
    }

    #[test]
    fn everything_else_is_other() {
        assert_eq!(
            ColumnRole::classify(&column_id("done"), &settings()),
            ColumnRole::Other
        );
    }

    #[test]
    fn tracked_membership_wins_over_starting() {
        let mut settings = settings();
        settings.starting_column_id = Some(column_id("doing"));
        assert_eq!(
            ColumnRole::classify(&column_id("doing"), &settings),
            ColumnRole::CycleTimeTracked
        );
    }

    #[test]
    fn column_deserializes_without_cards() {
        let json = r#"{"id": "list-1", "name": "Backlog"}"#;
        let column: Column = serde_json::from_str(json).unwrap();
        assert_eq!(column.name, "Backlog");
        assert!(column.cards.is_empty());
    }
}
