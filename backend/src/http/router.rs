//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::config::ServerConfig;
use super::handlers;
use super::state::AppState;

/// Create the application router with the default allowed origins.
pub fn create_router(state: AppState) -> Router {
    create_router_with_config(state, &ServerConfig::default())
}

/// Create the main application router with all routes and middleware.
pub fn create_router_with_config(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(
            "/authors",
            get(handlers::list_authors).post(handlers::create_author),
        )
        .route("/books", get(handlers::list_books).post(handlers::create_book))
        .route(
            "/reviews",
            get(handlers::list_reviews).post(handlers::create_review),
        )
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins))
        .with_state(state)
}

/// Browser access from a fixed origin list, any method and header, with credentials.
///
/// Credentialed CORS cannot use wildcards, so methods and headers mirror the
/// preflight request instead.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
