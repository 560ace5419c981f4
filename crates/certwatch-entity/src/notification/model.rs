//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use certwatch_core::types::{ClientId, NotificationId};

use super::severity::Severity;

/// A notification raised by the expiry sweep for one client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The client the notification is about.
    pub client_id: ClientId,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Severity level.
    pub severity: Severity,
    /// Days remaining at the time the notification was raised.
    pub days_remaining: i64,
    /// Whether an operator has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification is still open.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// A notification joined with a summary of its client, for the feed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationDetail {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Owning client.
    pub client_id: ClientId,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Severity level.
    pub severity: Severity,
    /// Days remaining snapshot.
    pub days_remaining: i64,
    /// Read flag.
    pub is_read: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Client name.
    pub client_name: String,
    /// Client line of business.
    pub business_type: String,
    /// Client location.
    pub location: String,
    /// Client certificate expiry date.
    pub expiry_date: String,
    /// Client contact person.
    pub contact_person: String,
}

/// Data required to insert a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// Owning client.
    pub client_id: ClientId,
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    pub severity: Severity,
    /// Days remaining snapshot.
    pub days_remaining: i64,
}

/// Read-state filter for notification listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReadFilter {
    /// Both read and unread.
    #[default]
    All,
    /// Only unread.
    Unread,
    /// Only read.
    Read,
}
