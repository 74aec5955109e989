//! Derives stage entry and exit instants from a card's history.
//!
//! Both scans walk the history newest first and stop at the first matching
//! column move, so the result is the most recent crossing of the tracked
//! boundary, not the first one ever. A card that re-enters a tracked column
//! after leaving it has its timer restarted from the latest entry.
//!
//! When no move crosses the boundary, the newest event's timestamp is used;
//! an empty history yields `now`.

use std::collections::HashSet;

use crate::domain::board::{ActionEvent, ListTransition};
use crate::domain::foundation::{ColumnId, Timestamp};

/// Most recent time the card moved into `tracked` from outside it.
pub fn most_recent_entry_time(
    events: &[ActionEvent],
    tracked: &HashSet<ColumnId>,
    now: Timestamp,
) -> Timestamp {
    scan(events, now, |transition| {
        tracked.contains(&transition.list_after.id) && !tracked.contains(&transition.list_before.id)
    })
}

/// Most recent time the card moved out of `tracked` to a column outside it.
pub fn most_recent_exit_time(
    events: &[ActionEvent],
    tracked: &HashSet<ColumnId>,
    now: Timestamp,
) -> Timestamp {
    scan(events, now, |transition| {
        !tracked.contains(&transition.list_after.id) && tracked.contains(&transition.list_before.id)
    })
}

fn scan<F>(events: &[ActionEvent], now: Timestamp, crosses: F) -> Timestamp
where
    F: Fn(&ListTransition) -> bool,
{
    let fallback = events.first().map(|event| event.timestamp).unwrap_or(now);

    events
        .iter()
        .find(|event| event.transition.as_ref().is_some_and(&crosses))
        .map(|event| event.timestamp)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::ColumnRef;

    fn col(id: &str) -> ColumnRef {
        ColumnRef::new(ColumnId::new(id).unwrap(), id.to_uppercase())
    }

    fn at(minutes: i64) -> Timestamp {
        Timestamp::from_unix_millis(0).unwrap().plus_minutes(minutes)
    }

    fn moved(minutes: i64, before: &str, after: &str) -> ActionEvent {
        ActionEvent::moved(at(minutes), col(before), col(after))
    }

    fn tracked(ids: &[&str]) -> HashSet<ColumnId> {
        ids.iter().map(|id| ColumnId::new(*id).unwrap()).collect()
    }

    #[test]
    fn entry_time_is_latest_move_into_tracked_set() {
        let events = vec![moved(10, "a", "b"), moved(5, "x", "a")];

        let entry = most_recent_entry_time(&events, &tracked(&["b"]), at(100));

        assert_eq!(entry, at(10));
    }

    #[test]
    fn entry_time_ignores_moves_within_tracked_set() {
        let events = vec![
            moved(30, "doing", "review"),
            moved(20, "todo", "doing"),
            moved(10, "backlog", "todo"),
        ];

        let entry = most_recent_entry_time(&events, &tracked(&["doing", "review"]), at(100));

        assert_eq!(entry, at(20));
    }

    #[test]
    fn re_entry_restarts_the_timer() {
        let events = vec![
            moved(50, "todo", "doing"),
            moved(40, "doing", "todo"),
            moved(20, "todo", "doing"),
        ];

        let entry = most_recent_entry_time(&events, &tracked(&["doing"]), at(100));

        assert_eq!(entry, at(50));
    }

    #[test]
    fn exit_time_is_latest_move_out_of_tracked_set() {
        let events = vec![
            moved(60, "done", "archive"),
            moved(45, "review", "done"),
            moved(20, "todo", "review"),
        ];

        let exit = most_recent_exit_time(&events, &tracked(&["review"]), at(100));

        assert_eq!(exit, at(45));
    }

    #[test]
    fn exit_time_without_crossing_falls_back_to_newest_event() {
        let events = vec![moved(30, "x", "y"), moved(10, "y", "z")];

        let exit = most_recent_exit_time(&events, &tracked(&["doing"]), at(100));

        assert_eq!(exit, at(30));
    }

    #[test]
    fn events_without_transition_are_skipped() {
        let events = vec![
            ActionEvent::untransitioned(at(70)),
            moved(30, "todo", "doing"),
            ActionEvent::untransitioned(at(5)),
        ];

        let entry = most_recent_entry_time(&events, &tracked(&["doing"]), at(100));

        assert_eq!(entry, at(30));
    }

    #[test]
    fn creation_only_history_falls_back_to_creation_time() {
        let events = vec![ActionEvent::untransitioned(at(12))];

        assert_eq!(
            most_recent_entry_time(&events, &tracked(&["doing"]), at(100)),
            at(12)
        );
        assert_eq!(
            most_recent_exit_time(&events, &tracked(&["doing"]), at(100)),
            at(12)
        );
    }

    #[test]
    fn empty_history_yields_now() {
        assert_eq!(
            most_recent_entry_time(&[], &tracked(&["doing"]), at(100)),
            at(100)
        );
        assert_eq!(
            most_recent_exit_time(&[], &tracked(&["doing"]), at(100)),
            at(100)
        );
    }
}
