//! Client export handler.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::IntoResponse;

use certwatch_service::ClientService;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/export
///
/// Every client with its days remaining, served as a JSON attachment.
pub async fn export_clients(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let export = state.client_service.export(ClientService::today()).await?;

    let mut headers = HeaderMap::new();
    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok((
        headers,
        Json(serde_json::json!({
            "success": true,
            "data": export.data,
            "filename": export.filename,
            "exported_at": export.exported_at,
        })),
    ))
}
