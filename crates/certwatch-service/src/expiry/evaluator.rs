//! The expiry evaluation routine.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use certwatch_core::result::AppResult;
use certwatch_entity::client::{Client, ClientStatus};
use certwatch_entity::notification::Severity;

use super::notice::{approaching_notice, expired_notice};
use super::policy::{ExpiryDecision, ExpiryPolicy};
use super::store::ExpiryStore;

/// Summary of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Notifications inserted.
    pub created: u64,
    /// Clients transitioned to `Expired`.
    pub updated: u64,
    /// Clients handed to the sweep.
    pub total_checked: u64,
}

/// Applies an [`ExpiryPolicy`] to clients through an [`ExpiryStore`].
#[derive(Debug, Clone)]
pub struct ExpiryEvaluator {
    store: Arc<dyn ExpiryStore>,
    policy: ExpiryPolicy,
}

impl ExpiryEvaluator {
    /// Creates a new evaluator.
    pub fn new(store: Arc<dyn ExpiryStore>, policy: ExpiryPolicy) -> Self {
        Self { store, policy }
    }

    /// The active thresholds.
    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<dyn ExpiryStore> {
        &self.store
    }

    /// Load every active client and evaluate it against `today`.
    pub async fn run(&self, today: NaiveDate) -> AppResult<EvaluationResult> {
        let clients = self.store.list_active().await?;
        self.evaluate(&clients, today).await
    }

    /// Evaluate the given clients against `today`.
    ///
    /// Store errors abort the sweep; mutations already applied for earlier
    /// clients are kept.
    pub async fn evaluate(&self, clients: &[Client], today: NaiveDate) -> AppResult<EvaluationResult> {
        let mut result = EvaluationResult {
            total_checked: clients.len() as u64,
            ..EvaluationResult::default()
        };

        info!(clients = clients.len(), %today, "Checking certificate expiry");

        for client in clients {
            let days = match client.days_remaining(today) {
                Some(days) => days,
                None => {
                    warn!(
                        client_id = %client.id,
                        expiry_date = %client.expiry_date,
                        "Unparseable expiry date, treating as expiring today"
                    );
                    0
                }
            };

            match self.policy.decide(days) {
                ExpiryDecision::Expired => {
                    if client.status != ClientStatus::Expired {
                        self.store.mark_expired(client.id).await?;
                        result.updated += 1;
                        debug!(client_id = %client.id, days, "Marked client expired");
                    }
                    // Keyed on severity only: any unread danger notice suppresses this one.
                    if !self
                        .store
                        .unread_severity_exists(client.id, Severity::Danger)
                        .await?
                    {
                        self.store
                            .insert_notification(expired_notice(client, days))
                            .await?;
                        result.created += 1;
                    }
                }
                ExpiryDecision::Approaching(severity) => {
                    if !self.store.unread_days_exists(client.id, days).await? {
                        self.store
                            .insert_notification(approaching_notice(client, days, severity))
                            .await?;
                        result.created += 1;
                    }
                }
                ExpiryDecision::Valid => {}
            }
        }

        info!(
            created = result.created,
            updated = result.updated,
            total_checked = result.total_checked,
            "Certificate expiry check completed"
        );
        Ok(result)
    }
}
