//! Cron scheduler for the expiry check and notification retention.

use std::sync::Arc;

use chrono::Local;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use certwatch_core::config::WorkerConfig;
use certwatch_core::error::AppError;

use crate::executor::{JobExecutor, ScheduledTask};
use crate::jobs::{ExpiryCheckJobHandler, RetentionJobHandler};

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Executor the cron ticks dispatch to
    executor: Arc<JobExecutor>,
    /// Cron expressions
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("config", &self.config)
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(executor: Arc<JobExecutor>, config: WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            executor,
            config,
        })
    }

    /// Register all default scheduled tasks
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_expiry_check().await?;
        self.register_retention().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Daily certificate expiry check (default 08:00 local)
    async fn register_expiry_check(&self) -> Result<(), AppError> {
        let cron = self.config.expiry_check_cron.clone();
        self.register(ExpiryCheckJobHandler::JOB_TYPE, &cron).await?;
        tracing::info!("Registered: {} ({})", ExpiryCheckJobHandler::JOB_TYPE, cron);
        Ok(())
    }

    /// Weekly notification retention (default Sunday 02:00 local)
    async fn register_retention(&self) -> Result<(), AppError> {
        let cron = self.config.retention_cron.clone();
        self.register(RetentionJobHandler::JOB_TYPE, &cron).await?;
        tracing::info!("Registered: {} ({})", RetentionJobHandler::JOB_TYPE, cron);
        Ok(())
    }

    /// Fire `job_type` on the executor every time `cron` matches local time
    async fn register(&self, job_type: &'static str, cron: &str) -> Result<(), AppError> {
        if !self.executor.has_handler(job_type) {
            return Err(AppError::configuration(format!(
                "No handler registered for scheduled task '{}'",
                job_type
            )));
        }

        let executor = Arc::clone(&self.executor);
        let job = CronJob::new_async_tz(cron, Local, move |_uuid, _lock| {
            let executor = Arc::clone(&executor);
            Box::pin(async move {
                tracing::debug!("Cron tick for {}", job_type);
                match executor.execute(&ScheduledTask::now(job_type)).await {
                    Ok(output) => {
                        tracing::debug!("Scheduled task {} finished: {:?}", job_type, output)
                    }
                    Err(e) => tracing::error!("Scheduled task {} failed: {}", job_type, e),
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid cron expression '{}' for {}: {}",
                cron, job_type, e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add {} schedule: {}", job_type, e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::test_support::fixture;

    fn executor(service: Arc<certwatch_service::ExpiryService>) -> Arc<JobExecutor> {
        let mut executor = JobExecutor::new();
        executor.register(Arc::new(ExpiryCheckJobHandler::new(service.clone())));
        executor.register(Arc::new(RetentionJobHandler::new(service, 30)));
        Arc::new(executor)
    }

    #[tokio::test]
    async fn test_registers_default_crons() {
        let fx = fixture().await;
        let scheduler = CronScheduler::new(executor(fx.service), WorkerConfig::default())
            .await
            .unwrap();
        scheduler.register_default_tasks().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_bad_cron() {
        let fx = fixture().await;
        let config = WorkerConfig {
            expiry_check_cron: "every morning".to_string(),
            ..WorkerConfig::default()
        };
        let scheduler = CronScheduler::new(executor(fx.service), config).await.unwrap();
        let err = scheduler.register_default_tasks().await.expect_err("bad cron");
        assert_eq!(err.kind, certwatch_core::error::ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_requires_handlers() {
        let scheduler = CronScheduler::new(Arc::new(JobExecutor::new()), WorkerConfig::default())
            .await
            .unwrap();
        assert!(scheduler.register_default_tasks().await.is_err());
    }
}
