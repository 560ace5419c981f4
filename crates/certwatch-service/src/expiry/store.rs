//! Record-store port used by the expiry sweep.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use certwatch_core::error::AppError;
use certwatch_core::result::AppResult;
use certwatch_core::types::ClientId;
use certwatch_database::repositories::{ClientRepository, NotificationRepository};
use certwatch_entity::client::{Client, ClientStatus};
use certwatch_entity::notification::{NewNotification, Severity};

/// Storage operations the sweep depends on.
///
/// Each call is atomic on its own; the sweep never spans a transaction
/// across calls.
#[async_trait]
pub trait ExpiryStore: Send + Sync + std::fmt::Debug {
    /// Every client whose persisted status is `Active`.
    async fn list_active(&self) -> AppResult<Vec<Client>>;

    /// Set the client's status to `Expired` and bump its `updated_at`.
    async fn mark_expired(&self, client_id: ClientId) -> AppResult<()>;

    /// Whether an unread notification of `severity` exists for the client.
    async fn unread_severity_exists(
        &self,
        client_id: ClientId,
        severity: Severity,
    ) -> AppResult<bool>;

    /// Whether an unread notification for exactly `days` exists for the client.
    async fn unread_days_exists(&self, client_id: ClientId, days: i64) -> AppResult<bool>;

    /// Insert a new unread notification.
    async fn insert_notification(&self, notification: NewNotification) -> AppResult<()>;

    /// Delete read notifications created more than `days` days ago.
    async fn delete_read_older_than(&self, days: i64) -> AppResult<u64>;
}

/// Creation-time cutoff for the retention sweep: `now` minus `days`.
///
/// Fails with a validation error when `days` is negative or the cutoff
/// falls outside the representable date range.
pub fn retention_cutoff(days: i64, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
    if days < 0 {
        return Err(AppError::validation("Retention days must not be negative"));
    }
    Duration::try_days(days)
        .and_then(|age| now.checked_sub_signed(age))
        .ok_or_else(|| {
            AppError::validation(format!("Retention period of {days} days is out of range"))
        })
}

/// [`ExpiryStore`] backed by the SQL repositories.
#[derive(Debug, Clone)]
pub struct SqlExpiryStore {
    /// Client repository.
    clients: Arc<ClientRepository>,
    /// Notification repository.
    notifications: Arc<NotificationRepository>,
}

impl SqlExpiryStore {
    /// Creates a new SQL-backed store.
    pub fn new(clients: Arc<ClientRepository>, notifications: Arc<NotificationRepository>) -> Self {
        Self {
            clients,
            notifications,
        }
    }
}

#[async_trait]
impl ExpiryStore for SqlExpiryStore {
    async fn list_active(&self) -> AppResult<Vec<Client>> {
        self.clients.list_active().await
    }

    async fn mark_expired(&self, client_id: ClientId) -> AppResult<()> {
        self.clients
            .update_status(client_id, ClientStatus::Expired)
            .await?;
        Ok(())
    }

    async fn unread_severity_exists(
        &self,
        client_id: ClientId,
        severity: Severity,
    ) -> AppResult<bool> {
        self.notifications
            .unread_severity_exists(client_id, severity)
            .await
    }

    async fn unread_days_exists(&self, client_id: ClientId, days: i64) -> AppResult<bool> {
        self.notifications.unread_days_exists(client_id, days).await
    }

    async fn insert_notification(&self, notification: NewNotification) -> AppResult<()> {
        self.notifications.create(&notification).await?;
        Ok(())
    }

    async fn delete_read_older_than(&self, days: i64) -> AppResult<u64> {
        let cutoff = retention_cutoff(days, Utc::now())?;
        self.notifications.delete_read_older_than(cutoff).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certwatch_core::error::ErrorKind;

    #[test]
    fn test_retention_cutoff_in_range() {
        let now = Utc::now();
        assert_eq!(retention_cutoff(30, now).unwrap(), now - Duration::days(30));
        assert_eq!(retention_cutoff(0, now).unwrap(), now);
    }

    #[test]
    fn test_retention_cutoff_rejects_out_of_range() {
        let now = Utc::now();
        for days in [-1, 200_000_000, i64::MAX] {
            let err = retention_cutoff(days, now).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "days = {days}");
        }
    }
}
