//! Notification listing, read-state changes, and statistics.

use std::sync::Arc;

use tracing::info;

use certwatch_core::error::AppError;
use certwatch_core::types::NotificationId;
use certwatch_core::types::pagination::{PageRequest, PageResponse};
use certwatch_database::repositories::{NotificationCounts, NotificationRepository};
use certwatch_entity::notification::{NotificationDetail, ReadFilter, Severity};

/// Number of entries in the unread bell.
pub const UNREAD_FEED_LIMIT: i64 = 10;

/// Manages the notification feed.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>) -> Self {
        Self { notif_repo }
    }

    /// Lists notifications, newest first.
    pub async fn list(
        &self,
        read: ReadFilter,
        severity: Option<Severity>,
        page: PageRequest,
    ) -> Result<PageResponse<NotificationDetail>, AppError> {
        self.notif_repo.search(read, severity, &page).await
    }

    /// Latest unread notifications.
    pub async fn unread(&self) -> Result<Vec<NotificationDetail>, AppError> {
        self.notif_repo.list_unread(UNREAD_FEED_LIMIT).await
    }

    /// Marks a notification as read.
    pub async fn mark_read(&self, id: NotificationId) -> Result<(), AppError> {
        if !self.notif_repo.mark_read(id).await? {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }

    /// Marks every unread notification as read.
    pub async fn mark_all_read(&self) -> Result<u64, AppError> {
        let updated = self.notif_repo.mark_all_read().await?;
        info!(updated, "Marked all notifications as read");
        Ok(updated)
    }

    /// Deletes a notification.
    pub async fn delete(&self, id: NotificationId) -> Result<(), AppError> {
        if !self.notif_repo.delete(id).await? {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }

    /// Feed counters.
    pub async fn stats(&self) -> Result<NotificationCounts, AppError> {
        self.notif_repo.counts().await
    }
}
