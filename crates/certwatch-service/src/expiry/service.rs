//! Sweep entry points that record each run in the system log.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tracing::{error, info};

use certwatch_core::error::AppError;
use certwatch_entity::system_log::SystemAction;

use super::monitor::{ExpiryMonitor, SweepOutcome, SweepTrigger};
use super::store::retention_cutoff;
use crate::system_log::SystemLogService;

/// Runs expiry and retention sweeps on behalf of the scheduler, the API,
/// and the CLI.
#[derive(Debug, Clone)]
pub struct ExpiryService {
    /// Guarded evaluator.
    monitor: ExpiryMonitor,
    /// System log writer.
    system_log: Arc<SystemLogService>,
}

impl ExpiryService {
    /// Creates a new expiry service.
    pub fn new(monitor: ExpiryMonitor, system_log: Arc<SystemLogService>) -> Self {
        Self {
            monitor,
            system_log,
        }
    }

    /// The guarded evaluator.
    pub fn monitor(&self) -> &ExpiryMonitor {
        &self.monitor
    }

    /// Run the expiry check for today's local date.
    pub async fn check_now(&self, trigger: SweepTrigger) -> Result<SweepOutcome, AppError> {
        self.check(trigger, Local::now().date_naive()).await
    }

    /// Run the expiry check against `today` and log the outcome.
    pub async fn check(
        &self,
        trigger: SweepTrigger,
        today: NaiveDate,
    ) -> Result<SweepOutcome, AppError> {
        let outcome = match self.monitor.sweep(trigger, today).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(%trigger, error = %e, "Certificate expiry check failed");
                if trigger == SweepTrigger::Scheduled {
                    self.system_log
                        .record_quietly(SystemAction::ScheduledCheckError, e.message.clone())
                        .await;
                }
                return Err(e);
            }
        };

        if let SweepOutcome::Completed(result) = outcome {
            let (action, prefix) = match trigger {
                SweepTrigger::Scheduled => (SystemAction::ScheduledCheck, "Daily check completed"),
                SweepTrigger::Manual => (SystemAction::ManualCheck, "Manual check triggered"),
            };
            self.system_log
                .record(
                    action,
                    format!(
                        "{prefix}. Created {} notifications, updated {} statuses.",
                        result.created, result.updated
                    ),
                )
                .await?;
        }

        Ok(outcome)
    }

    /// Delete read notifications older than `days` and log the count.
    pub async fn cleanup(&self, days: i64) -> Result<u64, AppError> {
        retention_cutoff(days, Utc::now())?;

        match self.monitor.purge_read(days).await {
            Ok(deleted) => {
                info!(deleted, days, "Notification retention sweep completed");
                self.system_log
                    .record(
                        SystemAction::NotificationCleanup,
                        format!("Cleaned up {deleted} old notifications"),
                    )
                    .await?;
                Ok(deleted)
            }
            Err(e) => {
                error!(error = %e, "Notification retention sweep failed");
                self.system_log
                    .record_quietly(SystemAction::CleanupError, e.message.clone())
                    .await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::memory::{InMemoryExpiryStore, client_fixture};
    use crate::expiry::policy::ExpiryPolicy;
    use certwatch_core::error::ErrorKind;
    use certwatch_database::DatabasePool;
    use certwatch_database::migration::run_migrations;
    use certwatch_database::repositories::SystemLogRepository;
    use certwatch_entity::client::ClientStatus;
    use certwatch_entity::notification::{NewNotification, Severity};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()
    }

    async fn service(store: Arc<InMemoryExpiryStore>) -> (ExpiryService, Arc<SystemLogRepository>) {
        let db = DatabasePool::connect_in_memory().await.expect("connect");
        run_migrations(db.pool()).await.expect("migrate");
        let repo = Arc::new(SystemLogRepository::new(db.into_pool()));
        let system_log = Arc::new(SystemLogService::new(Arc::clone(&repo)));
        let monitor = ExpiryMonitor::new(store, ExpiryPolicy::default());
        (ExpiryService::new(monitor, system_log), repo)
    }

    async fn actions(repo: &SystemLogRepository) -> Vec<(String, Option<String>)> {
        repo.list_recent(10)
            .await
            .unwrap()
            .into_iter()
            .map(|e| (e.action, e.description))
            .collect()
    }

    fn approaching_store() -> Arc<InMemoryExpiryStore> {
        Arc::new(InMemoryExpiryStore::with_clients(vec![client_fixture(
            "PT. Gagal",
            "2025-02-13",
            ClientStatus::Active,
        )]))
    }

    #[tokio::test]
    async fn test_failed_scheduled_check_is_logged_and_returned() {
        let store = approaching_store();
        store.fail_inserts(true);
        let (service, repo) = service(Arc::clone(&store)).await;

        let err = service.check(SweepTrigger::Scheduled, today()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);

        let logged = actions(&repo).await;
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].0, "Scheduled Check Error");
        assert_eq!(logged[0].1.as_deref(), Some("Injected insert failure"));
        assert!(store.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_failed_manual_check_writes_no_entry() {
        let store = approaching_store();
        store.fail_inserts(true);
        let (service, repo) = service(store).await;

        let err = service.check(SweepTrigger::Manual, today()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(actions(&repo).await.is_empty());
    }

    #[tokio::test]
    async fn test_successful_check_records_counts() {
        let (service, repo) = service(approaching_store()).await;

        let outcome = service.check(SweepTrigger::Scheduled, today()).await.unwrap();
        assert_eq!(outcome.result().unwrap().created, 1);

        let logged = actions(&repo).await;
        assert_eq!(logged[0].0, "Scheduled Check");
        assert_eq!(
            logged[0].1.as_deref(),
            Some("Daily check completed. Created 1 notifications, updated 0 statuses.")
        );
    }

    #[tokio::test]
    async fn test_failed_cleanup_is_logged_and_returned() {
        let store = approaching_store();
        store.fail_deletes(true);
        let (service, repo) = service(store).await;

        let err = service.cleanup(30).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);

        let logged = actions(&repo).await;
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].0, "Cleanup Error");
        assert_eq!(logged[0].1.as_deref(), Some("Injected delete failure"));
    }

    #[tokio::test]
    async fn test_cleanup_rejects_out_of_range_days() {
        let store = approaching_store();
        let client_id = store.clients()[0].id;
        store.push_notification(
            NewNotification {
                client_id,
                title: "PT. Gagal - Certificate Expiring Soon".to_string(),
                message: "Certificate will expire in 3 days on 13 February 2025".to_string(),
                severity: Severity::Warning,
                days_remaining: 3,
            },
            true,
            Utc::now() - Duration::days(400),
        );
        let (service, repo) = service(Arc::clone(&store)).await;

        for days in [-1, 200_000_000, i64::MAX] {
            let err = service.cleanup(days).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "days = {days}");
        }
        assert_eq!(store.notifications().len(), 1);
        assert!(actions(&repo).await.is_empty());
    }

    #[tokio::test]
    async fn test_purge_with_huge_day_count_is_an_error() {
        let store = approaching_store();
        let monitor = ExpiryMonitor::new(store, ExpiryPolicy::default());
        let err = monitor.purge_read(200_000_000).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
