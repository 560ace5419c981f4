//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use certwatch_core::config::AppConfig;
use certwatch_database::DatabasePool;
use certwatch_database::repositories::{
    ClientRepository, NotificationRepository, SystemLogRepository,
};
use certwatch_service::{
    ClientService, ExpiryService, NotificationService, SystemLogService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// SQLite connection pool
    pub db: DatabasePool,

    // ── Repositories ─────────────────────────────────────────
    /// Client repository
    pub client_repo: Arc<ClientRepository>,
    /// Notification repository
    pub notification_repo: Arc<NotificationRepository>,
    /// System log repository
    pub system_log_repo: Arc<SystemLogRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Client management service
    pub client_service: Arc<ClientService>,
    /// Notification service
    pub notification_service: Arc<NotificationService>,
    /// Expiry and retention sweeps
    pub expiry_service: Arc<ExpiryService>,
    /// System log service
    pub system_log_service: Arc<SystemLogService>,
}
