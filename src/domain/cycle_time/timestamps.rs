//! Per-card start and completion instants, and how they are read back from
//! their persisted form.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::foundation::{CardId, Timestamp};

/// The instants recorded for a single card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTimestamps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl CardTimestamps {
    pub fn started(at: Timestamp) -> Self {
        Self {
            started_at: Some(at),
            completed_at: None,
        }
    }

    pub fn completed(started_at: Timestamp, completed_at: Timestamp) -> Self {
        Self {
            started_at: Some(started_at),
            completed_at: Some(completed_at),
        }
    }
}

/// Every timed card on a board, keyed by card id.
pub type CardTimestampMap = BTreeMap<CardId, CardTimestamps>;

/// Rebuilds a timestamp map from its serialized JSON form.
///
/// Fields whose name ends in `At` (or `_at`) are revived into instants from
/// RFC 3339 text or epoch milliseconds. A field that cannot be revived is
/// left absent on that entry; an entry that is not an object, or whose key
/// is blank, is dropped. Nothing here fails the whole load.
pub fn revive_timestamp_map(raw: &Value) -> CardTimestampMap {
    let mut map = CardTimestampMap::new();

    let Some(entries) = raw.as_object() else {
        if !raw.is_null() {
            tracing::warn!("Persisted timestamps are not an object, starting empty");
        }
        return map;
    };

    for (key, entry) in entries {
        let Ok(card_id) = CardId::new(key.as_str()) else {
            tracing::warn!(key = %key, "Dropping persisted timestamps with blank card id");
            continue;
        };

        let Some(fields) = entry.as_object() else {
            tracing::warn!(card_id = %card_id, "Dropping malformed persisted timestamps entry");
            continue;
        };

        let mut timestamps = CardTimestamps::default();
        for (field, value) in fields {
            if !is_instant_field(field) {
                continue;
            }

            let Some(instant) = revive_instant(value) else {
                tracing::warn!(
                    card_id = %card_id,
                    field = %field,
                    "Could not revive persisted instant, leaving it unset"
                );
                continue;
            };

            match field.as_str() {
                "startedAt" | "started_at" => timestamps.started_at = Some(instant),
                "completedAt" | "completed_at" => timestamps.completed_at = Some(instant),
                _ => tracing::debug!(field = %field, "Ignoring unknown instant field"),
            }
        }

        map.insert(card_id, timestamps);
    }

    map
}

fn is_instant_field(name: &str) -> bool {
    name.ends_with("At") || name.ends_with("_at")
}

fn revive_instant(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(text) => Timestamp::parse_rfc3339(text),
        Value::Number(number) => number.as_i64().and_then(Timestamp::from_unix_millis),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(id: &str) -> CardId {
        CardId::new(id).unwrap()
    }

    #[test]
    fn revives_rfc3339_fields() {
        let raw = json!({
            "abc": {
                "startedAt": "2024-01-15T10:30:00.000Z",
                "completedAt": "2024-01-15T12:30:00.000Z"
            }
        });

        let map = revive_timestamp_map(&raw);
        let entry = map.get(&card("abc")).unwrap();

        assert_eq!(
            entry.started_at,
            Timestamp::parse_rfc3339("2024-01-15T10:30:00Z")
        );
        assert_eq!(
            entry.completed_at,
            Timestamp::parse_rfc3339("2024-01-15T12:30:00Z")
        );
    }

    #[test]
    fn revives_epoch_millis() {
        let raw = json!({ "abc": { "startedAt": 1_705_314_600_000_i64 } });

        let map = revive_timestamp_map(&raw);

        assert_eq!(
            map.get(&card("abc")).unwrap().started_at,
            Timestamp::from_unix_millis(1_705_314_600_000)
        );
    }

    #[test]
    fn unparsable_field_is_left_unset_without_failing_load() {
        let raw = json!({
            "bad": { "startedAt": "yesterday-ish", "completedAt": "2024-01-15T12:30:00Z" },
            "good": { "startedAt": "2024-01-15T10:30:00Z" }
        });

        let map = revive_timestamp_map(&raw);

        let bad = map.get(&card("bad")).unwrap();
        assert!(bad.started_at.is_none());
        assert!(bad.completed_at.is_some());
        assert!(map.get(&card("good")).unwrap().started_at.is_some());
    }

    #[test]
    fn non_object_entries_are_dropped() {
        let raw = json!({
            "weird": "2024-01-15T10:30:00Z",
            "fine": { "startedAt": "2024-01-15T10:30:00Z" }
        });

        let map = revive_timestamp_map(&raw);

        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&card("fine")));
    }

    #[test]
    fn non_instant_fields_are_ignored() {
        let raw = json!({ "abc": { "name": "Card", "startedAt": "2024-01-15T10:30:00Z" } });

        let map = revive_timestamp_map(&raw);

        assert!(map.get(&card("abc")).unwrap().started_at.is_some());
    }

    #[test]
    fn non_object_root_yields_empty_map() {
        assert!(revive_timestamp_map(&json!([1, 2, 3])).is_empty());
        assert!(revive_timestamp_map(&Value::Null).is_empty());
    }

    #[test]
    fn serialized_map_revives_to_the_same_value() {
        let start = Timestamp::parse_rfc3339("2024-01-15T10:30:00Z").unwrap();
        let mut map = CardTimestampMap::new();
        map.insert(card("a"), CardTimestamps::started(start));
        map.insert(card("b"), CardTimestamps::completed(start, start.plus_minutes(95)));

        let raw = serde_json::to_value(&map).unwrap();

        assert_eq!(raw["a"]["startedAt"].as_str().map(|s| s.contains("2024-01-15")), Some(true));
        assert!(raw["a"].get("completedAt").is_none());
        assert_eq!(revive_timestamp_map(&raw), map);
    }
}
