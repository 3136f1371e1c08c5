//! Router configuration for the feed server.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{feed, health_check, AppState};

/// Create a CORS layer. No configured origins allows any origin.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    let parsed_origins: Vec<HeaderValue> =
        origins.iter().filter_map(|o| o.parse().ok()).collect();
    if parsed_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parsed_origins)
    }
}

/// Create the main router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(feed))
        .route("/health", get(health_check))
        .layer(create_cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
