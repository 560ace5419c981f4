//! Writes and reads the system log.

use std::sync::Arc;

use certwatch_core::error::AppError;
use certwatch_database::repositories::SystemLogRepository;
use certwatch_entity::system_log::{SystemAction, SystemLogEntry};

/// Maximum number of entries returned by a single listing.
pub const MAX_RECENT_ENTRIES: i64 = 500;

/// Records operator-visible actions.
#[derive(Debug, Clone)]
pub struct SystemLogService {
    /// System log repository.
    repo: Arc<SystemLogRepository>,
}

impl SystemLogService {
    /// Creates a new system log service.
    pub fn new(repo: Arc<SystemLogRepository>) -> Self {
        Self { repo }
    }

    /// Appends an entry.
    pub async fn record(
        &self,
        action: SystemAction,
        description: impl Into<String>,
    ) -> Result<SystemLogEntry, AppError> {
        self.repo.record(action, description).await
    }

    /// Appends an entry, logging instead of failing when the write fails.
    pub async fn record_quietly(&self, action: SystemAction, description: impl Into<String>) {
        if let Err(e) = self.repo.record(action, description).await {
            tracing::error!(action = %action, error = %e, "Failed to write system log entry");
        }
    }

    /// Lists the most recent entries, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<SystemLogEntry>, AppError> {
        self.repo.list_recent(limit.clamp(1, MAX_RECENT_ENTRIES)).await
    }
}
