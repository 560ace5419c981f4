//! System log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use certwatch_core::types::SystemLogId;

/// An immutable record of an operator-visible action.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SystemLogEntry {
    /// Unique entry identifier.
    pub id: SystemLogId,
    /// Short action name (e.g. `"Scheduled Check"`).
    pub action: String,
    /// Free-form description.
    pub description: Option<String>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Actions recorded in the system log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemAction {
    /// A client record was created.
    ClientCreated,
    /// A client record was edited.
    ClientUpdated,
    /// A client record was deleted.
    ClientDeleted,
    /// The daily expiry sweep completed.
    ScheduledCheck,
    /// The daily expiry sweep failed.
    ScheduledCheckError,
    /// An operator ran the expiry sweep on demand.
    ManualCheck,
    /// Old read notifications were deleted.
    NotificationCleanup,
    /// The retention sweep failed.
    CleanupError,
    /// Sample data was loaded.
    DatabaseSeeded,
}

impl SystemAction {
    /// Human-readable action name as stored in the log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientCreated => "Client Created",
            Self::ClientUpdated => "Client Updated",
            Self::ClientDeleted => "Client Deleted",
            Self::ScheduledCheck => "Scheduled Check",
            Self::ScheduledCheckError => "Scheduled Check Error",
            Self::ManualCheck => "Manual Notification Check",
            Self::NotificationCleanup => "Notification Cleanup",
            Self::CleanupError => "Cleanup Error",
            Self::DatabaseSeeded => "Database Seeded",
        }
    }
}

impl std::fmt::Display for SystemAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
