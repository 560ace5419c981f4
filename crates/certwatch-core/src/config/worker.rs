//! Background scheduler configuration.

use serde::{Deserialize, Serialize};

/// Cron-driven background job configuration.
///
/// Cron expressions use the six-field form with a leading seconds column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the scheduler is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Schedule for the certificate expiry check.
    #[serde(default = "default_expiry_check_cron")]
    pub expiry_check_cron: String,
    /// Schedule for the read-notification retention sweep.
    #[serde(default = "default_retention_cron")]
    pub retention_cron: String,
    /// Age in days after which read notifications are deleted.
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            expiry_check_cron: default_expiry_check_cron(),
            retention_cron: default_retention_cron(),
            retention_days: default_retention_days(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_expiry_check_cron() -> String {
    "0 0 8 * * *".to_string()
}

fn default_retention_cron() -> String {
    "0 0 2 * * Sun".to_string()
}

fn default_retention_days() -> i64 {
    30
}
