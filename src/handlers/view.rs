use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::error::{AppError, Result};
use crate::services::{mime::mime_type_for, ShareService};
use crate::viewer;
use crate::AppState;

/// Render the viewer page for a share
/// GET /view/:id
pub async fn view_share(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let meta = match ShareService::get_metadata(&state.db, &id).await {
        Ok(meta) => meta,
        Err(AppError::NotFound(_)) => {
            return Ok((StatusCode::NOT_FOUND, Html(viewer::render_not_found())).into_response());
        }
        Err(e) => return Err(e),
    };

    // Prefer the MIME type recorded at upload; fall back to inference when
    // the main file is somehow absent from the mapping.
    let mime_type = match ShareService::get_file(&state.db, &id, &meta.main_file).await {
        Ok(file) => file.mime_type,
        Err(_) => mime_type_for(&meta.main_file).to_string(),
    };

    let content_url = format!("/api/content/{}/{}", meta.id, meta.main_file);
    Ok(Html(viewer::render_view_page(&meta, &mime_type, &content_url)).into_response())
}
