use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::passenger_controller::PassengerController;
use crate::dto::passenger_dto::PassengerRequest;
use crate::models::passenger::Passenger;
use crate::routes::{json_body, method_not_allowed};
use crate::state::DirectoryState;
use crate::utils::errors::AppError;

pub fn create_passenger_router() -> Router<DirectoryState> {
    Router::new()
        .route(
            "/passengers",
            post(create_passenger)
                .get(list_passengers)
                .fallback(method_not_allowed),
        )
        .route(
            "/passengers/:id",
            get(get_passenger)
                .put(update_passenger)
                .delete(delete_passenger)
                .fallback(method_not_allowed),
        )
}

async fn create_passenger(
    State(state): State<DirectoryState>,
    payload: Result<Json<PassengerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Passenger>), AppError> {
    let request = json_body(payload)?;
    let controller = PassengerController::new(state.passengers.clone());
    let passenger = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(passenger)))
}

async fn list_passengers(
    State(state): State<DirectoryState>,
) -> Result<Json<Vec<Passenger>>, AppError> {
    let controller = PassengerController::new(state.passengers.clone());
    Ok(Json(controller.list().await?))
}

async fn get_passenger(
    State(state): State<DirectoryState>,
    Path(id): Path<String>,
) -> Result<Json<Passenger>, AppError> {
    let controller = PassengerController::new(state.passengers.clone());
    Ok(Json(controller.get_by_id(&id).await?))
}

async fn update_passenger(
    State(state): State<DirectoryState>,
    Path(id): Path<String>,
    payload: Result<Json<PassengerRequest>, JsonRejection>,
) -> Result<Json<Passenger>, AppError> {
    let request = json_body(payload)?;
    let controller = PassengerController::new(state.passengers.clone());
    Ok(Json(controller.update(&id, request).await?))
}

async fn delete_passenger(
    State(state): State<DirectoryState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let controller = PassengerController::new(state.passengers.clone());
    controller.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
