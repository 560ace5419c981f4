//! Notification repository implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use certwatch_core::error::{AppError, ErrorKind};
use certwatch_core::result::AppResult;
use certwatch_core::types::pagination::{PageRequest, PageResponse};
use certwatch_core::types::{ClientId, NotificationId};
use certwatch_entity::notification::{
    NewNotification, Notification, NotificationDetail, ReadFilter, Severity,
};

const DETAIL_COLUMNS: &str = "n.*, c.name AS client_name, c.business_type, c.location, \
     c.expiry_date, c.contact_person";

/// Aggregate notification counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct NotificationCounts {
    /// Every stored notification.
    pub total: i64,
    /// Notifications not yet read.
    pub unread: i64,
    /// Notifications with `warning` severity.
    pub warning: i64,
    /// Notifications with `danger` severity.
    pub danger: i64,
}

/// Repository for notification CRUD operations.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: SqlitePool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a notification by ID.
    pub async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find notification", e))
    }

    /// List notifications joined with their client, newest first.
    pub async fn search(
        &self,
        read: ReadFilter,
        severity: Option<Severity>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationDetail>> {
        let mut conditions = Vec::new();
        match read {
            ReadFilter::Unread => conditions.push("n.is_read = 0"),
            ReadFilter::Read => conditions.push("n.is_read = 1"),
            ReadFilter::All => {}
        }
        if severity.is_some() {
            conditions.push("n.severity = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!(
            "SELECT COUNT(*) FROM notifications n JOIN clients c ON n.client_id = c.id {where_clause}"
        );
        let select_sql = format!(
            "SELECT {DETAIL_COLUMNS} FROM notifications n JOIN clients c ON n.client_id = c.id \
             {where_clause} ORDER BY n.created_at DESC LIMIT ? OFFSET ?"
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, NotificationDetail>(&select_sql);
        if let Some(s) = severity {
            count_query = count_query.bind(s);
            select_query = select_query.bind(s);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
        })?;

        let items = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
            })?;

        Ok(PageResponse::new(items, page.page, page.page_size, total as u64))
    }

    /// Latest unread notifications joined with their client.
    pub async fn list_unread(&self, limit: i64) -> AppResult<Vec<NotificationDetail>> {
        let sql = format!(
            "SELECT {DETAIL_COLUMNS} FROM notifications n JOIN clients c ON n.client_id = c.id \
             WHERE n.is_read = 0 ORDER BY n.created_at DESC LIMIT ?"
        );
        sqlx::query_as::<_, NotificationDetail>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list unread", e))
    }

    /// Insert a notification.
    pub async fn create(&self, data: &NewNotification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, client_id, title, message, severity, days_remaining, is_read, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, 0, ?) RETURNING *",
        )
        .bind(NotificationId::new())
        .bind(data.client_id)
        .bind(&data.title)
        .bind(&data.message)
        .bind(data.severity)
        .bind(data.days_remaining)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))
    }

    /// Whether an unread notification of the given severity exists for a client.
    pub async fn unread_severity_exists(
        &self,
        client_id: ClientId,
        severity: Severity,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM notifications WHERE client_id = ? AND severity = ? AND is_read = 0)",
        )
        .bind(client_id)
        .bind(severity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up notification", e))
    }

    /// Whether an unread notification with the given day count exists for a client.
    pub async fn unread_days_exists(&self, client_id: ClientId, days: i64) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM notifications WHERE client_id = ? AND days_remaining = ? AND is_read = 0)",
        )
        .bind(client_id)
        .bind(days)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up notification", e))
    }

    /// Mark a notification as read.
    pub async fn mark_read(&self, id: NotificationId) -> AppResult<bool> {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark every unread notification as read.
    pub async fn mark_all_read(&self) -> AppResult<u64> {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE is_read = 0")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    /// Delete a notification.
    pub async fn delete(&self, id: NotificationId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete read notifications created before `before`.
    pub async fn delete_read_older_than(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM notifications WHERE is_read = 1 AND datetime(created_at) < datetime(?)",
        )
        .bind(before)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to clean up notifications", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Aggregate counters over all notifications.
    pub async fn counts(&self) -> AppResult<NotificationCounts> {
        sqlx::query_as::<_, NotificationCounts>(
            "SELECT COUNT(*) AS total, \
             COALESCE(SUM(CASE WHEN is_read = 0 THEN 1 ELSE 0 END), 0) AS unread, \
             COALESCE(SUM(CASE WHEN severity = 'warning' THEN 1 ELSE 0 END), 0) AS warning, \
             COALESCE(SUM(CASE WHEN severity = 'danger' THEN 1 ELSE 0 END), 0) AS danger \
             FROM notifications",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count notifications", e))
    }

    /// Set the creation time of a notification.
    ///
    /// Used to age fixtures in retention tests.
    #[cfg(any(test, feature = "test-util"))]
    pub async fn set_created_at(&self, id: NotificationId, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE notifications SET created_at = ? WHERE id = ?")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set created_at", e))?;
        Ok(())
    }
}
