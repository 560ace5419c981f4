//! Client handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use certwatch_core::types::ClientId;
use certwatch_core::types::pagination::PageResponse;
use certwatch_service::client::ClientQuery;
use certwatch_service::{ClientService, ClientStats, ClientView};

use crate::dto::request::{ClientFilterParams, ClientRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{PaginationParams, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/clients
pub async fn list_clients(
    State(state): State<AppState>,
    Query(filters): Query<ClientFilterParams>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ClientView>>>, ApiError> {
    let query = ClientQuery {
        status: filters.status_filter()?,
        search: filters.search,
    };
    let page = state
        .client_service
        .list(&query, params.into_page_request(), ClientService::today())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/clients/stats
pub async fn client_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ClientStats>>, ApiError> {
    let stats = state.client_service.stats(ClientService::today()).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/clients/expiring-soon
pub async fn expiring_soon(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ClientView>>>, ApiError> {
    let clients = state
        .client_service
        .expiring_soon(ClientService::today())
        .await?;
    Ok(Json(ApiResponse::ok(clients)))
}

/// GET /api/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ClientView>>, ApiError> {
    let id: ClientId = parse_id(&id)?;
    let client = state.client_service.get(id, ClientService::today()).await?;
    Ok(Json(ApiResponse::ok(client)))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ClientRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ClientView>>), ApiError> {
    let client = state.client_service.create(req.into_input()?).await?;
    let view = ClientView::new(client, ClientService::today(), &state.config.expiry);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(view, "Client created successfully")),
    ))
}

/// PUT /api/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ClientRequest>,
) -> Result<Json<ApiResponse<ClientView>>, ApiError> {
    let id: ClientId = parse_id(&id)?;
    let client = state.client_service.update(id, req.into_input()?).await?;
    let view = ClientView::new(client, ClientService::today(), &state.config.expiry);
    Ok(Json(ApiResponse::with_message(
        view,
        "Client updated successfully",
    )))
}

/// DELETE /api/clients/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id: ClientId = parse_id(&id)?;
    state.client_service.delete(id).await?;
    Ok(Json(ApiResponse::with_message((), "Client deleted successfully")))
}
