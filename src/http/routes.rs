//! Axum router configuration

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::convert::convert_audio;
use super::handlers::health_check;
use super::middleware::request_logger;

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", post(convert_audio))
        .route("/health", get(health_check))
        // Middleware
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes()))
        .layer(middleware::from_fn(request_logger))
        .layer(TraceLayer::new_for_http());

    // Speaker scripts and browser upload pages live on other origins
    if state.config.cors_enabled {
        router = router.layer(cors_layer());
    }

    router.with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .max_age(Duration::from_secs(3600))
}
