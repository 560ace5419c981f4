//! In-memory [`ExpiryStore`] for exercising the sweep without a database.

use std::sync::Mutex;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use certwatch_core::error::AppError;
use certwatch_core::result::AppResult;
use certwatch_core::types::{ClientId, NotificationId};
use certwatch_entity::client::{Client, ClientStatus};
use certwatch_entity::notification::{NewNotification, Notification, Severity};

use super::store::{ExpiryStore, retention_cutoff};

#[derive(Debug, Default)]
struct State {
    clients: Vec<Client>,
    notifications: Vec<Notification>,
    fail_inserts: bool,
    fail_deletes: bool,
}

/// Vector-backed store with optional latency and failure injection.
#[derive(Debug, Default)]
pub struct InMemoryExpiryStore {
    state: Mutex<State>,
    list_delay: Option<StdDuration>,
}

impl InMemoryExpiryStore {
    /// Creates a store holding the given clients.
    pub fn with_clients(clients: Vec<Client>) -> Self {
        Self {
            state: Mutex::new(State {
                clients,
                ..State::default()
            }),
            list_delay: None,
        }
    }

    /// Sleep this long inside every `list_active` call.
    pub fn with_list_delay(mut self, delay: StdDuration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    /// Make every subsequent `insert_notification` fail.
    pub fn fail_inserts(&self, fail: bool) {
        self.lock().fail_inserts = fail;
    }

    /// Make every subsequent `delete_read_older_than` fail.
    pub fn fail_deletes(&self, fail: bool) {
        self.lock().fail_deletes = fail;
    }

    /// Snapshot of every stored client.
    pub fn clients(&self) -> Vec<Client> {
        self.lock().clients.clone()
    }

    /// Look up one client.
    pub fn client(&self, id: ClientId) -> Option<Client> {
        self.lock().clients.iter().find(|c| c.id == id).cloned()
    }

    /// Snapshot of every stored notification, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().notifications.clone()
    }

    /// Store a notification directly, as if raised by an earlier sweep.
    pub fn push_notification(
        &self,
        notification: NewNotification,
        is_read: bool,
        created_at: DateTime<Utc>,
    ) -> NotificationId {
        let id = NotificationId::new();
        self.lock().notifications.push(Notification {
            id,
            client_id: notification.client_id,
            title: notification.title,
            message: notification.message,
            severity: notification.severity,
            days_remaining: notification.days_remaining,
            is_read,
            created_at,
        });
        id
    }

    /// Mark every notification as read.
    pub fn mark_all_read(&self) {
        for n in &mut self.lock().notifications {
            n.is_read = true;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ExpiryStore for InMemoryExpiryStore {
    async fn list_active(&self) -> AppResult<Vec<Client>> {
        let active: Vec<Client> = self
            .lock()
            .clients
            .iter()
            .filter(|c| c.status == ClientStatus::Active)
            .cloned()
            .collect();
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(active)
    }

    async fn mark_expired(&self, client_id: ClientId) -> AppResult<()> {
        let mut state = self.lock();
        if let Some(client) = state.clients.iter_mut().find(|c| c.id == client_id) {
            client.status = ClientStatus::Expired;
            client.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn unread_severity_exists(
        &self,
        client_id: ClientId,
        severity: Severity,
    ) -> AppResult<bool> {
        Ok(self
            .lock()
            .notifications
            .iter()
            .any(|n| n.client_id == client_id && n.severity == severity && !n.is_read))
    }

    async fn unread_days_exists(&self, client_id: ClientId, days: i64) -> AppResult<bool> {
        Ok(self
            .lock()
            .notifications
            .iter()
            .any(|n| n.client_id == client_id && n.days_remaining == days && !n.is_read))
    }

    async fn insert_notification(&self, notification: NewNotification) -> AppResult<()> {
        if self.lock().fail_inserts {
            return Err(AppError::database("Injected insert failure"));
        }
        self.push_notification(notification, false, Utc::now());
        Ok(())
    }

    async fn delete_read_older_than(&self, days: i64) -> AppResult<u64> {
        if self.lock().fail_deletes {
            return Err(AppError::database("Injected delete failure"));
        }
        let cutoff = retention_cutoff(days, Utc::now())?;
        let mut state = self.lock();
        let before = state.notifications.len();
        state
            .notifications
            .retain(|n| !(n.is_read && n.created_at < cutoff));
        Ok((before - state.notifications.len()) as u64)
    }
}

/// Build a client with placeholder contact details.
pub fn client_fixture(name: &str, expiry_date: &str, status: ClientStatus) -> Client {
    let now = Utc::now();
    Client {
        id: ClientId::new(),
        name: name.to_string(),
        business_type: "Manufacturing".to_string(),
        address: "Jl. Merdeka No. 10".to_string(),
        location: "Jakarta".to_string(),
        expiry_date: expiry_date.to_string(),
        last_audit_date: "2024-01-01".to_string(),
        certification_body: "TUV Rheinland".to_string(),
        contact_person: "Budi Santoso".to_string(),
        contact_channel: "budi@example.co.id".to_string(),
        status,
        created_at: now,
        updated_at: now,
    }
}
