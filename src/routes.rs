use crate::app::AppState;
use crate::handlers::{health_check, query_handler, service_info};
use axum::{Router, routing::get, routing::post};

/// Creates and configures all application routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/query", post(query_handler))
}
