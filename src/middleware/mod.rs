//! Middleware del sistema
//!
//! CORS, trazas HTTP y límite de concurrencia comunes a ambos servicios.

pub mod cors;

pub use cors::*;

use axum::Router;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

/// Aplica las capas comunes a un router ya con estado
pub fn apply_service_layers(router: Router, cors_origins: &[String], max_concurrent_requests: usize) -> Router {
    router
        .layer(cors_middleware(cors_origins))
        .layer(GlobalConcurrencyLimitLayer::new(max_concurrent_requests.max(1)))
        .layer(TraceLayer::new_for_http())
}
