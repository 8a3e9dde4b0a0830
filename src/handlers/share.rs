use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::Result;
use crate::models::{
    CreateShareRequest, CreatedResponse, DeletedResponse, ListSharesQuery, ShareListPage,
    ShareMetadata,
};
use crate::services::ShareService;
use crate::AppState;

/// Create a new share
/// POST /api/shares
pub async fn create_share(
    State(state): State<AppState>,
    Json(req): Json<CreateShareRequest>,
) -> Result<Json<CreatedResponse>> {
    let id = ShareService::create_share(&state.db, req).await?;
    Ok(Json(CreatedResponse { id }))
}

/// List shares (cursored page, or filtered by ?ids=a,b,c)
/// GET /api/shares
pub async fn list_shares(
    State(state): State<AppState>,
    Query(query): Query<ListSharesQuery>,
) -> Result<Json<ShareListPage>> {
    let page = ShareService::list_shares(&state.db, query).await?;
    Ok(Json(page))
}

/// Get share metadata (no file contents)
/// GET /api/shares/:id
pub async fn get_share(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ShareMetadata>> {
    let meta = ShareService::get_metadata(&state.db, &id).await?;
    Ok(Json(meta))
}

/// Delete a share
/// DELETE /api/shares/:id
pub async fn delete_share(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>> {
    ShareService::delete_share(&state.db, &id).await?;
    Ok(Json(DeletedResponse { deleted: true }))
}
