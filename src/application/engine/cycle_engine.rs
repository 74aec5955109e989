//! CycleEngine - Tracks how long each card spends in the workflow.
//!
//! Each poll fetches the board's columns, classifies every card against the
//! current settings and looks up the history of cards that are missing a
//! timestamp. Columns are processed concurrently. Within a column, all
//! lookups are joined before the timestamp map is persisted, once, and the
//! column's markings are emitted.
//!
//! Every outbound call goes through the shared [`RateLimitedExecutor`].
//!
//! ## Stale lookups
//!
//! `reset_and_repoll` and `apply_settings` bump a generation counter. Lookup
//! results gathered under an earlier generation are discarded instead of
//! being written over the reset map.
//!
//! ## Graceful Shutdown
//!
//! [`CycleEngine::run`] polls on a fixed interval until the shutdown watch
//! flips to `true`. A poll in flight finishes first.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::time::{self, MissedTickBehavior};

use crate::adapters::rate_limiter::RateLimitedExecutor;
use crate::domain::board::{BoardSettings, Card, Column, ColumnRef, ColumnRole};
use crate::domain::cycle_time::{CardState, CardTimestampMap, RenderInstruction};
use crate::domain::foundation::{BoardId, CardId, Timestamp};
use crate::ports::{
    HistoryError, HistorySource, Renderer, SettingsProvider, StorageScope, TimestampStore,
};

use super::config::EngineConfig;
use super::outcome::{PollOutcome, PollStats};

/// Cycle time tracker for a single board.
///
/// Share it as `Arc<CycleEngine>`; every method takes `&self`.
pub struct CycleEngine {
    board_id: BoardId,
    scope: StorageScope,
    history: Arc<dyn HistorySource>,
    settings_provider: Arc<dyn SettingsProvider>,
    renderer: Arc<dyn Renderer>,
    store: Arc<dyn TimestampStore>,
    executor: RateLimitedExecutor,
    config: EngineConfig,
    settings: RwLock<BoardSettings>,
    timestamps: Mutex<CardTimestampMap>,
    generation: AtomicU64,
    poll_guard: Mutex<()>,
}

impl CycleEngine {
    /// Create an engine with default configuration.
    pub fn new(
        board_id: BoardId,
        history: Arc<dyn HistorySource>,
        settings_provider: Arc<dyn SettingsProvider>,
        renderer: Arc<dyn Renderer>,
        store: Arc<dyn TimestampStore>,
        executor: RateLimitedExecutor,
    ) -> Self {
        Self::with_config(
            board_id,
            history,
            settings_provider,
            renderer,
            store,
            executor,
            EngineConfig::default(),
        )
    }

    /// Create an engine with custom configuration.
    pub fn with_config(
        board_id: BoardId,
        history: Arc<dyn HistorySource>,
        settings_provider: Arc<dyn SettingsProvider>,
        renderer: Arc<dyn Renderer>,
        store: Arc<dyn TimestampStore>,
        executor: RateLimitedExecutor,
        config: EngineConfig,
    ) -> Self {
        let scope = StorageScope::card_timestamps(&board_id);
        Self {
            board_id,
            scope,
            history,
            settings_provider,
            renderer,
            store,
            executor,
            config,
            settings: RwLock::new(BoardSettings::default()),
            timestamps: Mutex::new(CardTimestampMap::new()),
            generation: AtomicU64::new(0),
            poll_guard: Mutex::new(()),
        }
    }

    pub fn board_id(&self) -> &BoardId {
        &self.board_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current settings snapshot.
    pub async fn settings(&self) -> BoardSettings {
        self.settings.read().await.clone()
    }

    /// Current timestamp map snapshot.
    pub async fn timestamps(&self) -> CardTimestampMap {
        self.timestamps.lock().await.clone()
    }

    pub async fn is_enabled(&self) -> bool {
        self.settings.read().await.enabled
    }

    /// Number of resets and settings changes applied so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Load the board's settings and persisted timestamps.
    ///
    /// Read failures are logged; the engine then starts from defaults and an
    /// empty map.
    pub async fn initialize(&self) {
        let settings = match self.settings_provider.load(&self.board_id).await {
            Ok(settings) => settings.normalized(),
            Err(e) => {
                tracing::warn!(board_id = %self.board_id, error = %e, "Failed to load settings, using defaults");
                BoardSettings::default()
            }
        };

        let timestamps = match self.store.load(&self.scope).await {
            Ok(timestamps) => timestamps,
            Err(e) => {
                tracing::warn!(board_id = %self.board_id, error = %e, "Failed to load timestamps, starting empty");
                CardTimestampMap::new()
            }
        };

        tracing::info!(
            board_id = %self.board_id,
            enabled = settings.enabled,
            tracked_columns = settings.cycle_time_related_columns.len(),
            entries = timestamps.len(),
            "Engine initialized"
        );

        *self.settings.write().await = settings;
        *self.timestamps.lock().await = timestamps;
    }

    /// Turn tracking on, persist the change and poll immediately.
    pub async fn enable(&self) -> PollOutcome {
        let settings = {
            let mut settings = self.settings.write().await;
            settings.enabled = true;
            settings.clone()
        };
        self.persist_settings(&settings).await;
        tracing::info!(board_id = %self.board_id, "Tracking enabled");

        self.force_poll().await
    }

    /// Turn tracking off, persist the change and remove every marking.
    pub async fn disable(&self) {
        let settings = {
            let mut settings = self.settings.write().await;
            settings.enabled = false;
            settings.clone()
        };
        self.persist_settings(&settings).await;
        tracing::info!(board_id = %self.board_id, "Tracking disabled");

        // Wait out a poll in flight so its markings do not outlive the clear.
        let _polling = self.poll_guard.lock().await;
        self.clear_all_markings().await;
    }

    /// Replace the board's settings.
    ///
    /// Lookups in flight under the previous settings are discarded. Polls
    /// right away when the new settings are enabled.
    pub async fn apply_settings(&self, settings: BoardSettings) -> PollOutcome {
        let settings = settings.normalized();
        let enabled = settings.enabled;

        *self.settings.write().await = settings.clone();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.persist_settings(&settings).await;

        tracing::info!(
            board_id = %self.board_id,
            enabled,
            target_minutes = settings.target_cycle_time_minutes,
            tracked_columns = settings.cycle_time_related_columns.len(),
            "Settings applied"
        );

        if enabled {
            self.force_poll().await
        } else {
            let _polling = self.poll_guard.lock().await;
            self.clear_all_markings().await;
            PollOutcome::Disabled
        }
    }

    /// Columns of the board, for choosing tracked and starting columns.
    ///
    /// Fetched through the executor, so the call counts against the quota.
    pub async fn board_columns(&self) -> Result<Vec<ColumnRef>, HistoryError> {
        let columns = self
            .executor
            .execute(|| self.history.fetch_columns(&self.board_id))
            .await?;
        Ok(columns.iter().map(Column::column_ref).collect())
    }

    /// Forget every timestamp of the board, then poll.
    ///
    /// On a disabled board the timestamps are still cleared but no poll
    /// runs; the next enable repopulates them.
    pub async fn reset_and_repoll(&self) -> PollOutcome {
        let cleared: Vec<CardId> = {
            let mut timestamps = self.timestamps.lock().await;
            self.generation.fetch_add(1, Ordering::SeqCst);

            if let Err(e) = self.store.clear(&self.scope).await {
                tracing::warn!(board_id = %self.board_id, error = %e, "Failed to clear stored timestamps");
            }
            std::mem::take(&mut *timestamps).into_keys().collect()
        };

        tracing::info!(board_id = %self.board_id, cleared = cleared.len(), "Timestamps reset");
        self.clear_markings(&cleared).await;

        self.force_poll().await
    }

    /// Poll the board once, now.
    pub async fn force_poll(&self) -> PollOutcome {
        let _polling = self.poll_guard.lock().await;

        let settings = self.settings.read().await.clone();
        if !settings.enabled {
            tracing::debug!(board_id = %self.board_id, "Tracking disabled, skipping poll");
            return PollOutcome::Disabled;
        }

        let generation = self.generation.load(Ordering::SeqCst);

        let columns = match self
            .executor
            .execute(|| self.history.fetch_columns(&self.board_id))
            .await
        {
            Ok(columns) => columns,
            Err(e) => {
                tracing::warn!(board_id = %self.board_id, error = %e, "Failed to fetch board columns");
                return PollOutcome::ColumnsUnavailable;
            }
        };

        let now = Timestamp::now();
        let per_column = join_all(
            columns
                .iter()
                .map(|column| self.process_column(column, &settings, generation, now)),
        )
        .await;

        let mut stats = PollStats::default();
        for column_stats in per_column {
            stats.merge(column_stats);
        }

        let on_board: HashSet<&CardId> = columns
            .iter()
            .flat_map(|column| column.cards.iter().map(|card| &card.id))
            .collect();
        stats.removed += self.prune_absent(&on_board, generation).await;

        tracing::debug!(
            board_id = %self.board_id,
            columns = stats.columns,
            cards = stats.cards,
            lookups = stats.lookups,
            failed_lookups = stats.failed_lookups,
            removed = stats.removed,
            "Poll completed"
        );

        PollOutcome::Completed(stats)
    }

    /// Run the poll loop until shutdown signal is received.
    ///
    /// Polls are skipped while tracking is disabled.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            board_id = %self.board_id,
            poll_interval_secs = self.config.poll_interval.as_secs(),
            "Poll loop started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!(board_id = %self.board_id, "Poll loop stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.force_poll().await;
                }
            }
        }
    }

    async fn process_column(
        &self,
        column: &Column,
        settings: &BoardSettings,
        generation: u64,
        now: Timestamp,
    ) -> PollStats {
        let mut stats = PollStats {
            columns: 1,
            cards: column.cards.len(),
            ..Default::default()
        };

        let role = ColumnRole::classify(&column.id, settings);
        if role == ColumnRole::Starting {
            stats.removed = self.reset_column(column).await;
            return stats;
        }

        let tracking_configured = settings.has_tracked_columns();
        let states: Vec<(&Card, CardState)> = {
            let timestamps = self.timestamps.lock().await;
            column
                .cards
                .iter()
                .map(|card| {
                    let stored = timestamps.get(&card.id);
                    (card, CardState::classify(role, stored, tracking_configured))
                })
                .collect()
        };

        let lookups = states
            .iter()
            .filter(|(_, state)| state.needs_lookup())
            .map(|&(card, state)| async move {
                let result = self
                    .executor
                    .execute(|| self.history.fetch_actions(&card.id))
                    .await;
                (card, state, result)
            });
        let results = join_all(lookups).await;
        stats.lookups = results.len();

        let instructions: Vec<RenderInstruction> = {
            let mut timestamps = self.timestamps.lock().await;

            if self.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(
                    board_id = %self.board_id,
                    column_id = %column.id,
                    "Discarding lookups from a superseded poll"
                );
                stats.stale_columns = 1;
                return stats;
            }

            for (card, state, result) in results {
                match result {
                    Ok(events) => {
                        let existing = timestamps.remove(&card.id);
                        if let Some(updated) = state.apply_history(existing, &events, settings, now)
                        {
                            timestamps.insert(card.id.clone(), updated);
                        }
                    }
                    Err(e) => {
                        stats.failed_lookups += 1;
                        tracing::warn!(
                            board_id = %self.board_id,
                            card_id = %card.id,
                            error = %e,
                            "Failed to fetch card history"
                        );
                    }
                }
            }

            for (card, state) in &states {
                if let Some(stored) = timestamps.get_mut(&card.id) {
                    if state.discard_stale_completion(stored) {
                        tracing::debug!(card_id = %card.id, "Card reopened, completion discarded");
                    }
                }
            }

            if tracking_configured && !column.cards.is_empty() {
                self.save(&timestamps).await;
            }

            states
                .iter()
                .filter_map(|(card, state)| {
                    state.render(
                        &card.id,
                        timestamps.get(&card.id),
                        settings,
                        &self.config.thresholds,
                        now,
                    )
                })
                .collect()
        };

        let untracked: Vec<CardId> = states
            .iter()
            .filter(|(_, state)| *state == CardState::Untracked)
            .map(|(card, _)| card.id.clone())
            .collect();

        self.render(&instructions).await;
        self.clear_markings(&untracked).await;

        stats
    }

    /// Drops the timestamps of every card in the starting column.
    async fn reset_column(&self, column: &Column) -> usize {
        let removed = {
            let mut timestamps = self.timestamps.lock().await;
            let removed = column
                .cards
                .iter()
                .filter(|card| timestamps.remove(&card.id).is_some())
                .count();
            if removed > 0 {
                self.save(&timestamps).await;
            }
            removed
        };

        let card_ids: Vec<CardId> = column.cards.iter().map(|card| card.id.clone()).collect();
        self.clear_markings(&card_ids).await;

        removed
    }

    /// Drops entries of cards that are no longer on the board.
    async fn prune_absent(&self, on_board: &HashSet<&CardId>, generation: u64) -> usize {
        let mut timestamps = self.timestamps.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            return 0;
        }

        let before = timestamps.len();
        timestamps.retain(|card_id, _| on_board.contains(card_id));
        let pruned = before - timestamps.len();

        if pruned > 0 {
            tracing::debug!(board_id = %self.board_id, pruned, "Pruned cards no longer on the board");
            self.save(&timestamps).await;
        }
        pruned
    }

    async fn save(&self, timestamps: &CardTimestampMap) {
        if let Err(e) = self.store.save(&self.scope, timestamps).await {
            tracing::warn!(board_id = %self.board_id, error = %e, "Failed to save timestamps");
        }
    }

    async fn persist_settings(&self, settings: &BoardSettings) {
        if let Err(e) = self.settings_provider.save(&self.board_id, settings).await {
            tracing::warn!(board_id = %self.board_id, error = %e, "Failed to save settings");
        }
    }

    async fn render(&self, instructions: &[RenderInstruction]) {
        if instructions.is_empty() {
            return;
        }
        if let Err(e) = self.renderer.render(instructions).await {
            tracing::warn!(board_id = %self.board_id, error = %e, "Failed to render markings");
        }
    }

    async fn clear_markings(&self, card_ids: &[CardId]) {
        for card_id in card_ids {
            if let Err(e) = self.renderer.clear(card_id).await {
                tracing::debug!(card_id = %card_id, error = %e, "Failed to clear marking");
            }
        }
    }

    async fn clear_all_markings(&self) {
        let card_ids: Vec<CardId> = self.timestamps.lock().await.keys().cloned().collect();
        self.clear_markings(&card_ids).await;
    }
}

impl std::fmt::Debug for CycleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleEngine")
            .field("board_id", &self.board_id)
            .field("scope", &self.scope)
            .field("config", &self.config)
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}
