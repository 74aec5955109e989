//! Effective per-card state, recomputed every poll from column membership.
//!
//! [`CardState::classify`] is pure; the engine applies the resulting state
//! with [`CardState::apply_history`] once a lookup settles and asks
//! [`CardState::render`] for the marking to show.

use serde::{Deserialize, Serialize};

use crate::domain::board::{ActionEvent, BoardSettings, ColumnRole};
use crate::domain::foundation::{CardId, Timestamp};

use super::interpreter::{most_recent_entry_time, most_recent_exit_time};
use super::label::{elapsed_minutes, humanize_elapsed};
use super::severity::{Severity, SeverityThresholds};
use super::timestamps::CardTimestamps;

/// Prefix on labels of cards that left the workflow.
pub const COMPLETED_LABEL_PREFIX: &str = "Completed in:";

/// What the tracker should do with a card during the current poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    /// Nothing to measure: no column is tracked on this board.
    Untracked,
    /// The card sits in a tracked column.
    InProgress { needs_lookup: bool },
    /// The card sits in a column past the tracked ones.
    Completed { needs_lookup: bool },
    /// The card sits in the starting column; its timestamps are discarded.
    Reset,
}

impl CardState {
    /// Classifies a card from the role of its column and what is stored for it.
    ///
    /// A lookup is needed for an in-progress card without a start and for a
    /// completed card missing either instant. An existing start is kept.
    pub fn classify(
        role: ColumnRole,
        stored: Option<&CardTimestamps>,
        tracking_configured: bool,
    ) -> Self {
        match role {
            ColumnRole::Starting => CardState::Reset,
            ColumnRole::CycleTimeTracked => CardState::InProgress {
                needs_lookup: stored.map_or(true, |t| t.started_at.is_none()),
            },
            ColumnRole::Other if !tracking_configured => CardState::Untracked,
            ColumnRole::Other => CardState::Completed {
                needs_lookup: stored
                    .map_or(true, |t| t.started_at.is_none() || t.completed_at.is_none()),
            },
        }
    }

    pub fn needs_lookup(&self) -> bool {
        matches!(
            self,
            CardState::InProgress { needs_lookup: true }
                | CardState::Completed { needs_lookup: true }
        )
    }

    /// Drops a completion recorded on an earlier pass when the card is back in
    /// a tracked column. The start is kept. Returns true if anything changed.
    pub fn discard_stale_completion(&self, stored: &mut CardTimestamps) -> bool {
        match self {
            CardState::InProgress { .. } => stored.completed_at.take().is_some(),
            _ => false,
        }
    }

    /// Derives the card's timestamps from its history.
    ///
    /// Only meaningful for states that need a lookup; other states return the
    /// existing value untouched.
    pub fn apply_history(
        &self,
        existing: Option<CardTimestamps>,
        events: &[ActionEvent],
        settings: &BoardSettings,
        now: Timestamp,
    ) -> Option<CardTimestamps> {
        match self {
            CardState::InProgress { .. } => {
                let started = most_recent_entry_time(events, &settings.tracked_column_ids(), now);
                Some(CardTimestamps::started(started))
            }
            CardState::Completed { .. } => {
                let completed =
                    most_recent_exit_time(events, &settings.exit_boundary_ids(), now);
                let started = existing
                    .and_then(|t| t.started_at)
                    .unwrap_or_else(|| {
                        most_recent_entry_time(events, &settings.tracked_column_ids(), now)
                    });
                Some(CardTimestamps::completed(started, completed))
            }
            CardState::Untracked | CardState::Reset => existing,
        }
    }

    /// Builds the marking for a card, if it has the instants its state needs.
    pub fn render(
        &self,
        card_id: &CardId,
        stored: Option<&CardTimestamps>,
        settings: &BoardSettings,
        thresholds: &SeverityThresholds,
        now: Timestamp,
    ) -> Option<RenderInstruction> {
        let stored = stored?;
        let (elapsed, prefix) = match self {
            CardState::InProgress { .. } => (now.duration_since(&stored.started_at?), None),
            CardState::Completed { .. } => (
                stored.completed_at?.duration_since(&stored.started_at?),
                Some(COMPLETED_LABEL_PREFIX),
            ),
            CardState::Untracked | CardState::Reset => return None,
        };

        let humanized = humanize_elapsed(elapsed);
        let label = match prefix {
            Some(prefix) => format!("{prefix} {humanized}"),
            None => humanized,
        };
        let severity =
            thresholds.classify(elapsed_minutes(elapsed), settings.target_cycle_time_minutes);

        Some(RenderInstruction {
            card_id: card_id.clone(),
            label,
            severity,
        })
    }
}

/// A marking to show on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderInstruction {
    pub card_id: CardId,
    pub label: String,
    pub severity: Severity,
}
