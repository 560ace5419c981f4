//! Expiry evaluation thresholds.

use serde::{Deserialize, Serialize};

/// Thresholds used by the expiry sweep and the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryConfig {
    /// Certificates with at most this many days left produce an
    /// "expiring soon" notification.
    #[serde(default = "default_warning_window")]
    pub warning_window_days: i64,
    /// Within the warning window, at most this many days left escalates the
    /// notification to `danger`.
    #[serde(default = "default_danger_window")]
    pub danger_window_days: i64,
    /// Window used by the dashboard "expiring soon" statistics.
    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: i64,
    /// Maximum number of clients returned by the expiring-soon list.
    #[serde(default = "default_expiring_soon_limit")]
    pub expiring_soon_limit: i64,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            warning_window_days: default_warning_window(),
            danger_window_days: default_danger_window(),
            expiring_soon_days: default_expiring_soon_days(),
            expiring_soon_limit: default_expiring_soon_limit(),
        }
    }
}

fn default_warning_window() -> i64 {
    5
}

fn default_danger_window() -> i64 {
    2
}

fn default_expiring_soon_days() -> i64 {
    30
}

fn default_expiring_soon_limit() -> i64 {
    10
}
