//! What a single poll did.

/// Result of one poll of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Tracking is disabled for the board; nothing was fetched.
    Disabled,
    /// The board's columns could not be fetched; the poll ended early.
    ColumnsUnavailable,
    /// Every column was processed.
    Completed(PollStats),
}

impl PollOutcome {
    pub fn stats(&self) -> Option<&PollStats> {
        match self {
            PollOutcome::Completed(stats) => Some(stats),
            _ => None,
        }
    }
}

/// Counters collected over one completed poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub columns: usize,
    pub cards: usize,
    /// History lookups issued.
    pub lookups: usize,
    /// Lookups that failed; those cards are retried next poll.
    pub failed_lookups: usize,
    /// Columns whose lookup results were discarded after a reset or settings change.
    pub stale_columns: usize,
    /// Entries removed because their card was reset or left the board.
    pub removed: usize,
}

impl PollStats {
    pub(super) fn merge(&mut self, other: PollStats) {
        self.columns += other.columns;
        self.cards += other.cards;
        self.lookups += other.lookups;
        self.failed_lookups += other.failed_lookups;
        self.stale_columns += other.stale_columns;
        self.removed += other.removed;
    }
}
