//! Notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use certwatch_core::error::AppError;
use certwatch_core::types::NotificationId;
use certwatch_core::types::pagination::PageResponse;
use certwatch_database::repositories::NotificationCounts;
use certwatch_entity::notification::NotificationDetail;
use certwatch_service::{EvaluationResult, SweepOutcome, SweepTrigger};

use crate::dto::request::NotificationFilterParams;
use crate::dto::response::{ApiResponse, UpdatedCountResponse};
use crate::error::ApiError;
use crate::extractors::{PaginationParams, parse_id};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(filters): Query<NotificationFilterParams>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<NotificationDetail>>>, ApiError> {
    let page = state
        .notification_service
        .list(
            filters.read_filter()?,
            filters.severity_filter()?,
            params.into_page_request(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/notifications/unread
pub async fn unread_notifications(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<NotificationDetail>>>, ApiError> {
    let items = state.notification_service.unread().await?;
    Ok(Json(ApiResponse::ok(items)))
}

/// GET /api/notifications/stats
pub async fn notification_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<NotificationCounts>>, ApiError> {
    let counts = state.notification_service.stats().await?;
    Ok(Json(ApiResponse::ok(counts)))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id: NotificationId = parse_id(&id)?;
    state.notification_service.mark_read(id).await?;
    Ok(Json(ApiResponse::with_message((), "Notification marked as read")))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UpdatedCountResponse>>, ApiError> {
    let updated_count = state.notification_service.mark_all_read().await?;
    Ok(Json(ApiResponse::with_message(
        UpdatedCountResponse { updated_count },
        "All notifications marked as read",
    )))
}

/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id: NotificationId = parse_id(&id)?;
    state.notification_service.delete(id).await?;
    Ok(Json(ApiResponse::with_message(
        (),
        "Notification deleted successfully",
    )))
}

/// POST /api/notifications/trigger-check
///
/// Waits for a sweep already in progress, then runs one.
pub async fn trigger_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<EvaluationResult>>, ApiError> {
    match state.expiry_service.check_now(SweepTrigger::Manual).await? {
        SweepOutcome::Completed(result) => Ok(Json(ApiResponse::with_message(
            result,
            "Manual notification check completed successfully",
        ))),
        SweepOutcome::Skipped => {
            Err(AppError::conflict("An expiry check is already running").into())
        }
    }
}
