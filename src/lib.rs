pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod viewer;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
}

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/shares",
            get(handlers::share::list_shares).post(handlers::share::create_share),
        )
        .route(
            "/shares/:id",
            get(handlers::share::get_share).delete(handlers::share::delete_share),
        )
        .route("/content/:id/*path", get(handlers::content::get_content));

    Router::new()
        .nest("/api", api_routes)
        .route("/view/:id", get(handlers::view::view_share))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
