//! System log handler.

use axum::Json;
use axum::extract::{Query, State};

use certwatch_entity::system_log::SystemLogEntry;

use crate::dto::request::SystemLogParams;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;

/// GET /api/system-logs
pub async fn list_system_logs(
    State(state): State<AppState>,
    Query(params): Query<SystemLogParams>,
) -> Result<Json<ApiResponse<Vec<SystemLogEntry>>>, ApiError> {
    let entries = state
        .system_log_service
        .recent(params.limit.unwrap_or(DEFAULT_LIMIT))
        .await?;
    Ok(Json(ApiResponse::ok(entries)))
}
