pub mod driver_routes;
pub mod passenger_routes;
pub mod ride_routes;

use axum::{extract::rejection::JsonRejection, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::config::environment::EnvironmentConfig;
use crate::middleware::apply_service_layers;
use crate::state::{AppState, DirectoryState};
use crate::utils::errors::AppError;

/// Router completo del servicio de viajes
pub fn build_ride_app(state: AppState, config: &EnvironmentConfig) -> Router {
    let router = Router::new()
        .route("/health", get(|| health("rides")))
        .merge(ride_routes::create_ride_router())
        .fallback(route_not_found)
        .with_state(state);

    apply_service_layers(router, &config.cors_origins, config.max_concurrent_requests)
}

/// Router completo del servicio de directorio
pub fn build_directory_app(state: DirectoryState, config: &EnvironmentConfig) -> Router {
    let router = Router::new()
        .route("/health", get(|| health("users")))
        .merge(driver_routes::create_driver_router())
        .merge(passenger_routes::create_passenger_router())
        .fallback(route_not_found)
        .with_state(state);

    apply_service_layers(router, &config.cors_origins, config.max_concurrent_requests)
}

/// Convierte los rechazos del extractor JSON en 400
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

pub(crate) async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

async fn health(service: &'static str) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": service,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
