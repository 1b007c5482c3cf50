use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use validator::Validate;

use crate::dto::ride_dto::{CreateRideRequest, ListRidesQuery, RideResponse, UpdateRideStatusRequest};
use crate::models::ride::RideStatus;
use crate::routes::{json_body, method_not_allowed};
use crate::services::ride_lifecycle_service::RideRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_ride_router() -> Router<AppState> {
    Router::new()
        .route(
            "/rides",
            post(create_ride).get(list_rides).fallback(method_not_allowed),
        )
        .route("/rides/:id", get(get_ride).fallback(method_not_allowed))
        .route(
            "/rides/:id/status",
            patch(update_ride_status).fallback(method_not_allowed),
        )
}

fn parse_status(value: &str) -> Result<RideStatus, AppError> {
    value.parse::<RideStatus>().map_err(AppError::Validation)
}

async fn create_ride(
    State(state): State<AppState>,
    payload: Result<Json<CreateRideRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RideResponse>), AppError> {
    let request = json_body(payload)?;
    request.validate()?;

    let ride = state
        .rides
        .create_ride(RideRequest {
            passenger_id: request.passenger_id,
            from_zone: request.from_zone,
            to_zone: request.to_zone,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ride.into())))
}

async fn list_rides(
    State(state): State<AppState>,
    Query(query): Query<ListRidesQuery>,
) -> Result<Json<Vec<RideResponse>>, AppError> {
    let status = query
        .status
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(parse_status)
        .transpose()?;
    let rides = state.rides.list_rides(status).await?;
    Ok(Json(rides.into_iter().map(RideResponse::from).collect()))
}

async fn get_ride(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RideResponse>, AppError> {
    let ride = state.rides.get_ride(&id).await?;
    Ok(Json(ride.into()))
}

async fn update_ride_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRideStatusRequest>, JsonRejection>,
) -> Result<Json<RideResponse>, AppError> {
    let request = json_body(payload)?;
    let status = parse_status(&request.status)?;

    let ride = state.rides.update_ride_status(&id, status).await?;
    Ok(Json(ride.into()))
}
