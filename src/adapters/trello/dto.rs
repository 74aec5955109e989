//! Wire types of the Trello REST API and their mapping onto the domain.

use serde::Deserialize;

use crate::domain::board::{ActionEvent, Card, Column, ColumnRef};
use crate::domain::foundation::{CardId, ColumnId, Timestamp};

#[derive(Debug, Deserialize)]
pub(super) struct TrelloList {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cards: Vec<TrelloCard>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TrelloCard {
    pub id: String,
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TrelloAction {
    pub date: String,
    #[serde(default)]
    pub data: Option<TrelloActionData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TrelloActionData {
    #[serde(default)]
    pub list_before: Option<TrelloListRef>,
    #[serde(default)]
    pub list_after: Option<TrelloListRef>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TrelloListRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Short link of a card: the last path segment of its short URL
/// (`https://trello.com/c/WiNIc9tP` → `WiNIc9tP`).
///
/// Short links are what the board's own card URLs carry, so they are the
/// ids the renderer can find cards by. Trello accepts them anywhere a card
/// id is expected.
pub(super) fn short_link(card: &TrelloCard) -> &str {
    card.short_url
        .as_deref()
        .and_then(|url| url.trim_end_matches('/').rsplit('/').next())
        .filter(|segment| !segment.is_empty())
        .unwrap_or(&card.id)
}

pub(super) fn columns_from_lists(lists: Vec<TrelloList>) -> Vec<Column> {
    lists
        .into_iter()
        .filter_map(|list| {
            let Ok(id) = ColumnId::new(list.id.as_str()) else {
                tracing::warn!("Skipping list with blank id");
                return None;
            };

            let cards = list
                .cards
                .iter()
                .filter_map(|card| match CardId::new(short_link(card)) {
                    Ok(card_id) => Some(Card::new(card_id, card.name.clone())),
                    Err(_) => {
                        tracing::warn!(column_id = %id, "Skipping card with blank id");
                        None
                    }
                })
                .collect();

            Some(Column::new(id, list.name, cards))
        })
        .collect()
}

pub(super) fn events_from_actions(actions: Vec<TrelloAction>) -> Vec<ActionEvent> {
    actions
        .into_iter()
        .filter_map(|action| {
            let Some(timestamp) = Timestamp::parse_rfc3339(&action.date) else {
                tracing::warn!(date = %action.date, "Skipping action with unparsable date");
                return None;
            };

            let transition = action
                .data
                .and_then(|data| Some((data.list_before?, data.list_after?)))
                .and_then(|(before, after)| Some((column_ref(before)?, column_ref(after)?)));

            Some(match transition {
                Some((before, after)) => ActionEvent::moved(timestamp, before, after),
                None => ActionEvent::untransitioned(timestamp),
            })
        })
        .collect()
}

fn column_ref(list: TrelloListRef) -> Option<ColumnRef> {
    ColumnId::new(list.id)
        .ok()
        .map(|id| ColumnRef::new(id, list.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_link_is_last_url_segment() {
        let card = TrelloCard {
            id: "5f0c1a".to_string(),
            short_url: Some("https://trello.com/c/WiNIc9tP".to_string()),
            name: "Card".to_string(),
        };
        assert_eq!(short_link(&card), "WiNIc9tP");
    }

    #[test]
    fn short_link_falls_back_to_card_id() {
        let card = TrelloCard {
            id: "5f0c1a".to_string(),
            short_url: None,
            name: "Card".to_string(),
        };
        assert_eq!(short_link(&card), "5f0c1a");
    }

    #[test]
    fn lists_map_to_columns() {
        let json = r#"[
            {"id": "l1", "name": "Doing", "cards": [
                {"id": "c1", "shortUrl": "https://trello.com/c/AbCd1234", "name": "First"}
            ]},
            {"id": "l2", "name": "Done"}
        ]"#;
        let lists: Vec<TrelloList> = serde_json::from_str(json).unwrap();

        let columns = columns_from_lists(lists);

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "Doing");
        assert_eq!(columns[0].cards[0].id.as_str(), "AbCd1234");
        assert_eq!(columns[0].cards[0].name, "First");
        assert!(columns[1].cards.is_empty());
    }

    #[test]
    fn actions_map_to_events() {
        let json = r#"[
            {"date": "2024-01-15T12:00:00.000Z", "data": {
                "listBefore": {"id": "l1", "name": "Todo"},
                "listAfter": {"id": "l2", "name": "Doing"}
            }},
            {"date": "2024-01-15T11:00:00.000Z", "data": {"card": {"name": "renamed"}}},
            {"date": "2024-01-15T10:00:00.000Z"}
        ]"#;
        let actions: Vec<TrelloAction> = serde_json::from_str(json).unwrap();

        let events = events_from_actions(actions);

        assert_eq!(events.len(), 3);
        let transition = events[0].transition.as_ref().unwrap();
        assert_eq!(transition.list_before.id.as_str(), "l1");
        assert_eq!(transition.list_after.id.as_str(), "l2");
        assert!(events[1].transition.is_none());
        assert!(events[2].transition.is_none());
        assert!(events[0].timestamp > events[1].timestamp);
    }

    #[test]
    fn half_transitions_are_not_moves() {
        let json = r#"[{"date": "2024-01-15T12:00:00Z", "data": {"listAfter": {"id": "l2"}}}]"#;
        let actions: Vec<TrelloAction> = serde_json::from_str(json).unwrap();

        let events = events_from_actions(actions);

        assert!(events[0].transition.is_none());
    }

    #[test]
    fn actions_with_bad_dates_are_skipped() {
        let json = r#"[{"date": "soon"}, {"date": "2024-01-15T12:00:00Z"}]"#;
        let actions: Vec<TrelloAction> = serde_json::from_str(json).unwrap();

        assert_eq!(events_from_actions(actions).len(), 1);
    }
}
