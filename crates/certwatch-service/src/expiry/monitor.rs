//! Non-reentrant wrapper around the evaluator.

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use certwatch_core::result::AppResult;

use super::evaluator::{EvaluationResult, ExpiryEvaluator};
use super::policy::ExpiryPolicy;
use super::store::ExpiryStore;

/// Who asked for a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepTrigger {
    /// The daily cron tick.
    Scheduled,
    /// An operator, through the API or CLI.
    Manual,
}

impl fmt::Display for SweepTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Result of asking the monitor for a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// The sweep ran to completion.
    Completed(EvaluationResult),
    /// A scheduled tick found another sweep in progress and did nothing.
    Skipped,
}

impl SweepOutcome {
    /// The evaluation summary, if the sweep ran.
    pub fn result(&self) -> Option<EvaluationResult> {
        match self {
            Self::Completed(result) => Some(*result),
            Self::Skipped => None,
        }
    }
}

/// Runs at most one sweep at a time.
///
/// A scheduled tick that finds a sweep in progress is skipped. A manual
/// trigger waits for the running sweep and then evaluates again.
#[derive(Debug, Clone)]
pub struct ExpiryMonitor {
    evaluator: ExpiryEvaluator,
    guard: Arc<Mutex<()>>,
}

impl ExpiryMonitor {
    /// Creates a monitor over the given store.
    pub fn new(store: Arc<dyn ExpiryStore>, policy: ExpiryPolicy) -> Self {
        Self {
            evaluator: ExpiryEvaluator::new(store, policy),
            guard: Arc::new(Mutex::new(())),
        }
    }

    /// The wrapped evaluator.
    pub fn evaluator(&self) -> &ExpiryEvaluator {
        &self.evaluator
    }

    /// Whether a sweep currently holds the guard.
    pub fn is_running(&self) -> bool {
        self.guard.try_lock().is_err()
    }

    /// Sweep all active clients against `today`.
    pub async fn sweep(&self, trigger: SweepTrigger, today: NaiveDate) -> AppResult<SweepOutcome> {
        let _running = match trigger {
            SweepTrigger::Manual => self.guard.lock().await,
            SweepTrigger::Scheduled => match self.guard.try_lock() {
                Ok(guard) => guard,
                Err(_) => {
                    info!(%trigger, "Expiry check already running, skipping tick");
                    return Ok(SweepOutcome::Skipped);
                }
            },
        };

        info!(%trigger, "Starting expiry check");
        let result = self.evaluator.run(today).await?;
        Ok(SweepOutcome::Completed(result))
    }

    /// Sweep against the local calendar date.
    pub async fn sweep_now(&self, trigger: SweepTrigger) -> AppResult<SweepOutcome> {
        self.sweep(trigger, Local::now().date_naive()).await
    }

    /// Delete read notifications older than `days`.
    pub async fn purge_read(&self, days: i64) -> AppResult<u64> {
        let deleted = self.evaluator.store().delete_read_older_than(days).await?;
        info!(deleted, days, "Cleaned up old read notifications");
        Ok(deleted)
    }
}
