//! Headless cycle time tracker.
//!
//! Polls one Trello board, persists card timestamps to disk and logs the
//! marking each card would carry. Configuration comes from
//! `CYCLE_TIME_TRACKER__*` environment variables (see `config`).

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use cycle_time_tracker::adapters::{
    FileTimestampStore, InMemorySettingsProvider, RateLimitedExecutor, TracingRenderer,
    TrelloHistorySource,
};
use cycle_time_tracker::application::{CycleEngine, EngineConfig};
use cycle_time_tracker::config::{AppConfig, TrackerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.tracker);
    config.validate()?;

    let board_id = config.tracker.board_id()?;
    let engine_config = EngineConfig::default()
        .with_poll_interval(config.tracker.poll_interval())
        .with_thresholds(config.severity.thresholds()?);

    let history = TrelloHistorySource::new(config.trello.client_config()?)?;
    let settings_provider =
        InMemorySettingsProvider::with_board(board_id.clone(), config.board.settings()?);
    let store = FileTimestampStore::new(&config.storage.data_dir);

    let engine = Arc::new(CycleEngine::with_config(
        board_id,
        Arc::new(history),
        Arc::new(settings_provider),
        Arc::new(TracingRenderer),
        Arc::new(store),
        RateLimitedExecutor::new(config.rate_limit.clone()),
        engine_config,
    ));
    engine.initialize().await;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = tokio::spawn({
        let engine = engine.clone();
        async move { engine.run(shutdown_rx).await }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");

    let _ = shutdown_tx.send(true);
    poller.await?;

    Ok(())
}

fn init_tracing(tracker: &TrackerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&tracker.log_level));

    if tracker.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
