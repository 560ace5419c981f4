//! System log repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use certwatch_core::error::{AppError, ErrorKind};
use certwatch_core::result::AppResult;
use certwatch_core::types::SystemLogId;
use certwatch_entity::system_log::{SystemAction, SystemLogEntry};

/// Repository for system log entries.
#[derive(Debug, Clone)]
pub struct SystemLogRepository {
    pool: SqlitePool,
}

impl SystemLogRepository {
    /// Create a new system log repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append an entry to the system log.
    pub async fn record(
        &self,
        action: SystemAction,
        description: impl Into<String>,
    ) -> AppResult<SystemLogEntry> {
        sqlx::query_as::<_, SystemLogEntry>(
            "INSERT INTO system_logs (id, action, description, created_at) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(SystemLogId::new())
        .bind(action.as_str())
        .bind(description.into())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to write system log", e))
    }

    /// Most recent entries, newest first.
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<SystemLogEntry>> {
        sqlx::query_as::<_, SystemLogEntry>(
            "SELECT * FROM system_logs ORDER BY created_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list system logs", e))
    }
}
