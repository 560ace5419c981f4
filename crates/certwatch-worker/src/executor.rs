//! Job executor: dispatches scheduled tasks to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing;

use certwatch_core::error::AppError;

/// One firing of a scheduled task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Handler key, e.g. `"expiry_check"`.
    pub job_type: String,
    /// When the tick fired.
    pub triggered_at: DateTime<Utc>,
    /// Handler-specific parameters.
    pub payload: Value,
}

impl ScheduledTask {
    /// A task of the given type firing now with an empty payload.
    pub fn now(job_type: impl Into<String>) -> Self {
        Self {
            job_type: job_type.into(),
            triggered_at: Utc::now(),
            payload: Value::Null,
        }
    }
}

/// Trait for job handler implementations
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// Get the job type this handler processes
    fn job_type(&self) -> &str;

    /// Execute the task
    async fn execute(&self, task: &ScheduledTask) -> Result<Option<Value>, JobExecutionError>;
}

/// Error from job execution
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// Permanent failure: the next tick will fail the same way
    #[error("Permanent job failure: {0}")]
    Permanent(String),

    /// Transient failure: the next tick may succeed
    #[error("Transient job failure: {0}")]
    Transient(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

/// Dispatches tasks to the appropriate handler based on job_type
#[derive(Debug)]
pub struct JobExecutor {
    /// Registered job handlers by type
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl JobExecutor {
    /// Create a new job executor
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a job handler
    pub fn register(&mut self, handler: Arc<dyn JobHandler>) {
        let job_type = handler.job_type().to_string();
        tracing::info!("Registered job handler for type '{}'", job_type);
        self.handlers.insert(job_type, handler);
    }

    /// Execute a task by dispatching to the correct handler
    pub async fn execute(&self, task: &ScheduledTask) -> Result<Option<Value>, JobExecutionError> {
        let handler = self.handlers.get(&task.job_type).ok_or_else(|| {
            JobExecutionError::Permanent(format!(
                "No handler registered for job type '{}'",
                task.job_type
            ))
        })?;

        tracing::info!(
            "Executing scheduled task: type='{}', triggered_at={}",
            task.job_type,
            task.triggered_at
        );

        handler.execute(task).await
    }

    /// Check if a handler is registered for a job type
    pub fn has_handler(&self, job_type: &str) -> bool {
        self.handlers.contains_key(job_type)
    }

    /// Get the list of registered job types
    pub fn registered_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.handlers.keys().cloned().collect();
        types.sort();
        types
    }
}

impl Default for JobExecutor {
    fn default() -> Self {
        Self::new()
    }
}
