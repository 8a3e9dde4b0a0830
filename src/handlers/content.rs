use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use base64::{engine::general_purpose, Engine as _};

use crate::error::{AppError, Result};
use crate::services::ShareService;
use crate::AppState;

/// Serve a share's raw file content by relative path.
/// GET /api/content/:id/*path
///
/// This is what makes uploaded sites hostable: every asset of the share is
/// addressable under its original relative path.
pub async fn get_content(
    State(state): State<AppState>,
    Path((id, path)): Path<(String, String)>,
) -> Result<Response> {
    let file = ShareService::get_file(&state.db, &id, &path).await?;
    let data = general_purpose::STANDARD.decode(&file.content)?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.mime_type)
        .header(header::CONTENT_LENGTH, data.len())
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
