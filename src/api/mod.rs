//! HTTP surface of the token service

pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::service::StsService;

/// Create the API router. Methods not listed for a route are answered
/// with 405 by the router itself.
pub fn create_router(sts: StsService) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::prometheus_metrics))
        // Key publication
        .route("/public-key", get(handlers::public_key))
        .route("/.well-known/jwks.json", get(handlers::jwks))
        // Credentials and tokens
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(sts)
}
