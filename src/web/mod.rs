use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::api::SearchClient;

pub mod handlers;
pub mod pages;

/// Shared by every page request. Each request builds its own `SearchSession`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: SearchClient,
    pub max_results: Option<u32>,
}

pub fn create_router(state: AppState, static_dir: &str) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::home_handler))
        .route("/search", get(handlers::search_handler))
        .route("/about", get(handlers::about_handler))
        .with_state(Arc::new(state))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
