//! Dashboard handlers.

use axum::Json;
use axum::extract::State;

use certwatch_service::{ClientService, ClientView};

use crate::dto::response::{ApiResponse, DashboardStatsResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStatsResponse>>, ApiError> {
    let clients = state.client_service.stats(ClientService::today()).await?;
    let notifications = state.notification_service.stats().await?;
    Ok(Json(ApiResponse::ok(DashboardStatsResponse {
        clients,
        notifications,
    })))
}

/// GET /api/dashboard/expiring-soon
pub async fn expiring_soon(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ClientView>>>, ApiError> {
    let clients = state
        .client_service
        .expiring_soon(ClientService::today())
        .await?;
    Ok(Json(ApiResponse::ok(clients)))
}
