//! Database configuration.

use serde::{Deserialize, Serialize};

/// SQLite connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL (e.g. `sqlite://data/certwatch.db`).
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Create the database file when it does not exist yet.
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
    /// Extra attempts made when the initial connection or migration fails.
    #[serde(default = "default_startup_retries")]
    pub startup_retries: u32,
    /// Delay between startup attempts in seconds.
    #[serde(default = "default_startup_retry_delay")]
    pub startup_retry_delay_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            create_if_missing: true,
            startup_retries: default_startup_retries(),
            startup_retry_delay_seconds: default_startup_retry_delay(),
        }
    }
}

fn default_url() -> String {
    "sqlite://data/certwatch.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_startup_retries() -> u32 {
    1
}

fn default_startup_retry_delay() -> u64 {
    2
}
