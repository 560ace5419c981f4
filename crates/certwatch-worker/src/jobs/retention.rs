//! Weekly removal of old read notifications.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing;

use certwatch_service::ExpiryService;

use crate::executor::{JobExecutionError, JobHandler, ScheduledTask};

/// Deletes read notifications past the retention age
#[derive(Debug)]
pub struct RetentionJobHandler {
    /// Expiry service
    service: Arc<ExpiryService>,
    /// Max age in days before cleanup
    retention_days: i64,
}

impl RetentionJobHandler {
    /// Job type key
    pub const JOB_TYPE: &'static str = "notification_retention";

    /// Create a new retention job handler
    pub fn new(service: Arc<ExpiryService>, retention_days: i64) -> Self {
        Self {
            service,
            retention_days,
        }
    }
}

#[async_trait]
impl JobHandler for RetentionJobHandler {
    fn job_type(&self) -> &str {
        Self::JOB_TYPE
    }

    async fn execute(&self, _task: &ScheduledTask) -> Result<Option<Value>, JobExecutionError> {
        tracing::info!(
            "[SCHEDULED] Running notification cleanup (older than {} days)",
            self.retention_days
        );

        let deleted = self
            .service
            .cleanup(self.retention_days)
            .await
            .map_err(|e| {
                JobExecutionError::Transient(format!("Notification cleanup failed: {}", e))
            })?;

        Ok(Some(serde_json::json!({
            "task": Self::JOB_TYPE,
            "deleted": deleted,
            "retention_days": self.retention_days,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::test_support::fixture;

    #[tokio::test]
    async fn test_cleanup_logs_count() {
        let fx = fixture().await;
        let handler = RetentionJobHandler::new(fx.service.clone(), 30);

        let out = handler
            .execute(&ScheduledTask::now(RetentionJobHandler::JOB_TYPE))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(out["deleted"], 0);

        let logs = fx.system_log.list_recent(10).await.unwrap();
        assert_eq!(logs[0].action, "Notification Cleanup");
        assert_eq!(
            logs[0].description.as_deref(),
            Some("Cleaned up 0 old notifications")
        );
    }
}
