mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::{test_config, TestApp};
use ridenow::repositories::{InMemoryDriverRepository, InMemoryPassengerRepository};
use ridenow::routes::build_directory_app;
use ridenow::state::DirectoryState;

fn directory_app() -> TestApp {
    let state = DirectoryState::new(
        Arc::new(InMemoryDriverRepository::new()),
        Arc::new(InMemoryPassengerRepository::new()),
    );
    TestApp::new(build_directory_app(state, &test_config()))
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = directory_app().get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "users");
}

#[tokio::test]
async fn test_driver_registration_and_availability() {
    let app = directory_app();

    let (status, ana) = app.post("/drivers", &json!({ "name": "Ana" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ana["name"], "Ana");
    assert_eq!(ana["is_available"], true);
    let (_, bruno) = app.post("/drivers", &json!({ "name": "Bruno" })).await;

    let status_uri = format!("/drivers/{}/status", ana["id"].as_str().unwrap());
    let (status, updated) = app.patch(&status_uri, &json!({ "is_available": false })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_available"], false);

    let (_, all) = app.get("/drivers").await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, available) = app.get("/drivers?available=true").await;
    let available = available.as_array().unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0]["id"], bruno["id"]);

    // Cualquier otro valor no filtra
    let (_, unfiltered) = app.get("/drivers?available=yes").await;
    assert_eq!(unfiltered.as_array().unwrap().len(), 2);

    let (status, fetched) = app.get(&format!("/drivers/{}", ana["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_driver_errors() {
    let app = directory_app();

    let (status, _) = app.post("/drivers", &json!({ "name": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/drivers/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = format!("/drivers/{}/status", uuid::Uuid::new_v4());
    let (status, _) = app.patch(&missing, &json!({ "is_available": true })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.patch(&missing, &json!({ "is_available": "maybe" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.delete("/drivers").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_passenger_crud() {
    let app = directory_app();

    let (status, created) = app.post("/passengers", &json!({ "name": "Paula" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/passengers/{}", created["id"].as_str().unwrap());

    let (status, fetched) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Paula");

    let (status, renamed) = app.put(&uri, &json!({ "name": "Paula R." })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Paula R.");
    assert_eq!(renamed["created_at"], created["created_at"]);

    let (_, list) = app.get("/passengers").await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_passenger_validation() {
    let app = directory_app();

    let (status, _) = app.post("/passengers", &json!({ "name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.put("/passengers/abc", &json!({ "name": "X" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.patch("/passengers", &json!({ "name": "X" })).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
