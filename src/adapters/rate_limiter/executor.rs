//! Rate-limited executor for outbound board API operations.
//!
//! Admits at most `max_operations_per_period` operations per period. Excess
//! operations wait in a FIFO queue and are flushed when the period refreshes.
//!
//! A single refresh timer is pending at a time. It is armed by the first
//! submission made while no timer is pending, and re-armed after every
//! refresh that flushed at least one queued operation. A refresh that finds
//! the queue empty leaves the executor idle until the next submission.
//!
//! Operations run in submission order and none is ever dropped. Completion
//! order of the work an operation starts is not guaranteed.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::oneshot;

use super::config::RateLimitConfig;

type Operation = Box<dyn FnOnce() + Send + 'static>;

/// Admission-controls operations against a fixed quota per period.
///
/// Cloning is cheap; clones share the same quota and queue.
#[derive(Clone)]
pub struct RateLimitedExecutor {
    config: RateLimitConfig,
    state: Arc<Mutex<ExecutorState>>,
}

struct ExecutorState {
    remaining: u32,
    queue: VecDeque<Operation>,
    refresh_pending: bool,
}

impl RateLimitedExecutor {
    /// Create an executor with the given quota.
    pub fn new(config: RateLimitConfig) -> Self {
        let state = ExecutorState {
            remaining: config.max_operations_per_period,
            queue: VecDeque::new(),
            refresh_pending: false,
        };

        Self {
            config,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Create an executor with the default quota.
    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Operations still admissible in the current period.
    pub fn remaining(&self) -> u32 {
        self.lock().remaining
    }

    /// Operations waiting for a later period.
    pub fn queued(&self) -> usize {
        self.lock().queue.len()
    }

    /// Run `operation` now if the quota allows, otherwise queue it.
    ///
    /// Must be called from within a Tokio runtime; the period refresh is a
    /// spawned timer.
    pub fn submit<F>(&self, operation: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let (run_now, arm) = {
            let mut state = self.lock();

            let arm = !state.refresh_pending;
            state.refresh_pending = true;

            if state.remaining > 0 {
                state.remaining -= 1;
                (Some(operation), arm)
            } else {
                state.queue.push_back(Box::new(operation));
                (None, arm)
            }
        };

        if arm {
            self.arm_refresh();
        }

        if let Some(operation) = run_now {
            operation();
        } else {
            tracing::debug!(queued = self.queued(), "Quota exhausted, operation queued");
        }
    }

    /// Wait for admission, then run the async operation to completion.
    pub async fn execute<F, Fut, T>(&self, operation: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let (admitted, admission) = oneshot::channel();
        self.submit(move || {
            let _ = admitted.send(());
        });

        // The sender only disappears if the runtime drops the refresh timer
        // during shutdown; proceed rather than hang.
        let _ = admission.await;
        operation().await
    }

    fn arm_refresh(&self) {
        let executor = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(executor.config.period()).await;
            executor.refresh();
        });
    }

    fn refresh(&self) {
        let flushed: Vec<Operation> = {
            let mut state = self.lock();
            state.remaining = self.config.max_operations_per_period;

            let count = (state.remaining as usize).min(state.queue.len());
            let flushed: Vec<Operation> = state.queue.drain(..count).collect();
            state.remaining -= count as u32;
            state.refresh_pending = !flushed.is_empty();
            flushed
        };

        if flushed.is_empty() {
            return;
        }

        tracing::debug!(
            flushed = flushed.len(),
            still_queued = self.queued(),
            "Period refreshed, flushing queued operations"
        );
        self.arm_refresh();
        for operation in flushed {
            operation();
        }
    }

    fn lock(&self) -> MutexGuard<'_, ExecutorState> {
        // Operations never run while the lock is held, so a poisoned lock
        // still holds consistent state.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for RateLimitedExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitedExecutor")
            .field("config", &self.config)
            .field("remaining", &self.remaining())
            .field("queued", &self.queued())
            .finish()
    }
}
