//! Route definitions for the CertWatch HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(client_routes())
        .merge(notification_routes())
        .merge(dashboard_routes())
        .merge(export_routes())
        .merge(system_log_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Client CRUD, stats, and the expiring-soon list
fn client_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clients",
            get(handlers::client::list_clients).post(handlers::client::create_client),
        )
        .route("/clients/stats", get(handlers::client::client_stats))
        .route(
            "/clients/expiring-soon",
            get(handlers::client::expiring_soon),
        )
        .route(
            "/clients/{id}",
            get(handlers::client::get_client)
                .put(handlers::client::update_client)
                .delete(handlers::client::delete_client),
        )
}

/// Notification feed, read state, and the manual check
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread",
            get(handlers::notification::unread_notifications),
        )
        .route(
            "/notifications/stats",
            get(handlers::notification::notification_stats),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/trigger-check",
            post(handlers::notification::trigger_check),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notification::delete_notification),
        )
}

/// Dashboard counters
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(handlers::dashboard::stats))
        .route(
            "/dashboard/expiring-soon",
            get(handlers::dashboard::expiring_soon),
        )
}

/// JSON export
fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/export", get(handlers::export::export_clients))
        .route("/export/excel", get(handlers::export::export_clients))
}

/// System log
fn system_log_routes() -> Router<AppState> {
    Router::new().route("/system-logs", get(handlers::system_log::list_system_logs))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
