use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, patch, post},
    Json, Router,
};

use crate::controllers::driver_controller::DriverController;
use crate::dto::driver_dto::{CreateDriverRequest, DriverListQuery, UpdateDriverStatusRequest};
use crate::models::driver::Driver;
use crate::routes::{json_body, method_not_allowed};
use crate::state::DirectoryState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<DirectoryState> {
    Router::new()
        .route(
            "/drivers",
            post(create_driver).get(list_drivers).fallback(method_not_allowed),
        )
        .route("/drivers/:id", get(get_driver).fallback(method_not_allowed))
        .route(
            "/drivers/:id/status",
            patch(set_driver_status).fallback(method_not_allowed),
        )
}

async fn create_driver(
    State(state): State<DirectoryState>,
    payload: Result<Json<CreateDriverRequest>, JsonRejection>,
) -> Result<Json<Driver>, AppError> {
    let request = json_body(payload)?;
    let controller = DriverController::new(state.drivers.clone());
    let driver = controller.create(request).await?;
    Ok(Json(driver))
}

async fn list_drivers(
    State(state): State<DirectoryState>,
    Query(query): Query<DriverListQuery>,
) -> Result<Json<Vec<Driver>>, AppError> {
    let controller = DriverController::new(state.drivers.clone());
    let drivers = controller.list(&query).await?;
    Ok(Json(drivers))
}

async fn get_driver(
    State(state): State<DirectoryState>,
    Path(id): Path<String>,
) -> Result<Json<Driver>, AppError> {
    let controller = DriverController::new(state.drivers.clone());
    let driver = controller.get_by_id(&id).await?;
    Ok(Json(driver))
}

async fn set_driver_status(
    State(state): State<DirectoryState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDriverStatusRequest>, JsonRejection>,
) -> Result<Json<Driver>, AppError> {
    let request = json_body(payload)?;
    let controller = DriverController::new(state.drivers.clone());
    let driver = controller.set_availability(&id, request).await?;
    Ok(Json(driver))
}
