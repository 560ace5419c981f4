//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use certwatch_core::config::{AppConfig, CorsConfig};
use certwatch_core::error::AppError;
use certwatch_database::DatabasePool;
use certwatch_database::repositories::{
    ClientRepository, NotificationRepository, SystemLogRepository,
};
use certwatch_service::client::seed_if_empty;
use certwatch_service::{
    ClientService, ExpiryMonitor, ExpiryPolicy, ExpiryService, NotificationService,
    SqlExpiryStore, SystemLogService,
};
use certwatch_worker::jobs::{ExpiryCheckJobHandler, RetentionJobHandler};
use certwatch_worker::{CronScheduler, JobExecutor};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state)
        .layer(build_compression_layer())
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
}

/// Builds repositories and services on top of an initialized pool.
pub fn build_state(config: AppConfig, db: DatabasePool) -> AppState {
    let pool = db.pool().clone();

    let client_repo = Arc::new(ClientRepository::new(pool.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(pool.clone()));
    let system_log_repo = Arc::new(SystemLogRepository::new(pool));

    let system_log_service = Arc::new(SystemLogService::new(Arc::clone(&system_log_repo)));
    let client_service = Arc::new(ClientService::new(
        Arc::clone(&client_repo),
        Arc::clone(&system_log_service),
        config.expiry.clone(),
    ));
    let notification_service = Arc::new(NotificationService::new(Arc::clone(
        &notification_repo,
    )));

    let store = Arc::new(SqlExpiryStore::new(
        Arc::clone(&client_repo),
        Arc::clone(&notification_repo),
    ));
    let monitor = ExpiryMonitor::new(store, ExpiryPolicy::from(&config.expiry));
    let expiry_service = Arc::new(ExpiryService::new(
        monitor,
        Arc::clone(&system_log_service),
    ));

    AppState {
        config: Arc::new(config),
        db,
        client_repo,
        notification_repo,
        system_log_repo,
        client_service,
        notification_service,
        expiry_service,
        system_log_service,
    }
}

/// Registers the job handlers and starts the cron scheduler.
pub async fn start_scheduler(state: &AppState) -> Result<CronScheduler, AppError> {
    let mut executor = JobExecutor::new();
    executor.register(Arc::new(ExpiryCheckJobHandler::new(Arc::clone(
        &state.expiry_service,
    ))));
    executor.register(Arc::new(RetentionJobHandler::new(
        Arc::clone(&state.expiry_service),
        state.config.worker.retention_days,
    )));

    let scheduler =
        CronScheduler::new(Arc::new(executor), state.config.worker.clone()).await?;
    scheduler.register_default_tasks().await?;
    scheduler.start().await?;
    Ok(scheduler)
}

/// Runs the CertWatch server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CertWatch server...");

    // ── Step 1: Database ─────────────────────────────────────────
    let db = DatabasePool::initialize(&config.database).await?;

    // ── Step 2: Repositories and services ────────────────────────
    let state = build_state(config.clone(), db.clone());

    // ── Step 3: Sample data ──────────────────────────────────────
    if config.seed.on_startup {
        let seeded = seed_if_empty(&state.client_repo, &state.system_log_repo).await?;
        tracing::info!("Seed on startup inserted {} clients", seeded);
    }

    // ── Step 4: Scheduler ────────────────────────────────────────
    let mut scheduler = if config.worker.enabled {
        Some(start_scheduler(&state).await?)
    } else {
        tracing::info!("Scheduler disabled by configuration");
        None
    };

    // ── Step 5: HTTP server ──────────────────────────────────────
    let app = build_app(state, &config.server.cors);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("CertWatch server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)));

    // ── Step 6: Teardown ─────────────────────────────────────────
    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!("Scheduler shutdown failed: {}", e);
        }
    }
    db.close().await;
    tracing::info!("CertWatch server stopped");

    served
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
