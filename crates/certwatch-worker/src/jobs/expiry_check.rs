//! Daily certificate expiry check.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing;

use certwatch_service::{ExpiryService, SweepOutcome, SweepTrigger};

use crate::executor::{JobExecutionError, JobHandler, ScheduledTask};

/// Runs the guarded expiry sweep on the cron tick
#[derive(Debug)]
pub struct ExpiryCheckJobHandler {
    /// Expiry service
    service: Arc<ExpiryService>,
}

impl ExpiryCheckJobHandler {
    /// Job type key
    pub const JOB_TYPE: &'static str = "expiry_check";

    /// Create a new expiry check job handler
    pub fn new(service: Arc<ExpiryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl JobHandler for ExpiryCheckJobHandler {
    fn job_type(&self) -> &str {
        Self::JOB_TYPE
    }

    async fn execute(&self, _task: &ScheduledTask) -> Result<Option<Value>, JobExecutionError> {
        tracing::info!("[SCHEDULED] Running daily certificate check");

        let outcome = self
            .service
            .check_now(SweepTrigger::Scheduled)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Expiry check failed: {}", e)))?;

        let output = match outcome {
            SweepOutcome::Completed(result) => serde_json::json!({
                "task": Self::JOB_TYPE,
                "created": result.created,
                "updated": result.updated,
                "total_checked": result.total_checked,
            }),
            SweepOutcome::Skipped => serde_json::json!({
                "task": Self::JOB_TYPE,
                "skipped": true,
            }),
        };
        Ok(Some(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::test_support::fixture;
    use certwatch_entity::client::{ClientInput, ClientStatus};
    use chrono::{Duration, Local};

    #[tokio::test]
    async fn test_runs_sweep_and_logs_scheduled_check() {
        let fx = fixture().await;
        let today = Local::now().date_naive();
        fx.clients
            .create(&ClientInput {
                name: "PT. Maju Jaya".to_string(),
                business_type: "Manufacturing".to_string(),
                address: "Jl. Merdeka No. 10, Jakarta".to_string(),
                location: "Jakarta".to_string(),
                expiry_date: today + Duration::days(3),
                last_audit_date: today - Duration::days(365),
                certification_body: "TUV Rheinland".to_string(),
                contact_person: "Budi Santoso".to_string(),
                contact_channel: "081234567890".to_string(),
                status: ClientStatus::Active,
            })
            .await
            .unwrap();

        let handler = ExpiryCheckJobHandler::new(fx.service.clone());
        let out = handler
            .execute(&ScheduledTask::now(ExpiryCheckJobHandler::JOB_TYPE))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(out["created"], 1);
        assert_eq!(out["total_checked"], 1);
        assert_eq!(fx.notifications.counts().await.unwrap().warning, 1);

        let logs = fx.system_log.list_recent(10).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action, "Scheduled Check");
        assert_eq!(
            logs[0].description.as_deref(),
            Some("Daily check completed. Created 1 notifications, updated 0 statuses.")
        );
    }
}
