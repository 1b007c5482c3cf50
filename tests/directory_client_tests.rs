mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;

use common::{spawn_server, test_config};
use ridenow::clients::{DirectoryDriver, DirectoryError, DriverDirectory, HttpDriverDirectory};
use ridenow::repositories::{DriverRepository, InMemoryDriverRepository, InMemoryPassengerRepository};
use ridenow::routes::build_directory_app;
use ridenow::services::DriverSelectionPolicy;
use ridenow::state::DirectoryState;

async fn directory_with(names: &[&str]) -> (Arc<InMemoryDriverRepository>, HttpDriverDirectory) {
    let drivers = Arc::new(InMemoryDriverRepository::new());
    for name in names {
        drivers.create(name.to_string()).await.unwrap();
    }
    let state = DirectoryState::new(drivers.clone(), Arc::new(InMemoryPassengerRepository::new()));
    let url = spawn_server(build_directory_app(state, &test_config())).await;
    let client = HttpDriverDirectory::new(url, Duration::from_secs(5)).unwrap();
    (drivers, client)
}

#[tokio::test]
async fn test_finds_first_registered_available_driver() {
    let (drivers, client) = directory_with(&["ana", "bruno"]).await;
    let listed = drivers.list(false).await.unwrap();

    let id = client.find_available_driver().await.unwrap();
    assert_eq!(id, listed[0].id.to_string());

    client.set_driver_availability(&id, false).await.unwrap();
    let next = client.find_available_driver().await.unwrap();
    assert_eq!(next, listed[1].id.to_string());
}

#[tokio::test]
async fn test_empty_directory_means_no_driver() {
    let (_, client) = directory_with(&[]).await;

    let err = client.find_available_driver().await.unwrap_err();
    assert!(matches!(err, DirectoryError::NoDriverAvailable));
}

#[tokio::test]
async fn test_set_availability_is_idempotent() {
    let (drivers, client) = directory_with(&["ana"]).await;
    let driver = drivers.list(false).await.unwrap().remove(0);
    let id = driver.id.to_string();

    client.set_driver_availability(&id, false).await.unwrap();
    client.set_driver_availability(&id, false).await.unwrap();
    assert!(!drivers.find_by_id(driver.id).await.unwrap().unwrap().is_available);

    assert!(client.set_driver_availability(&id, true).await.is_ok());
    assert!(client.set_driver_availability(&id, true).await.is_ok());
    assert!(drivers.find_by_id(driver.id).await.unwrap().unwrap().is_available);
}

#[tokio::test]
async fn test_unknown_driver_is_a_remote_error() {
    let (_, client) = directory_with(&["ana"]).await;

    let err = client
        .set_driver_availability(&uuid::Uuid::new_v4().to_string(), true)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DirectoryError::Remote { operation: "set_driver_availability", status: 404, .. }
    ));
}

#[tokio::test]
async fn test_server_error_is_reported_with_status() {
    let router = Router::new().route(
        "/drivers",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database down") }),
    );
    let client = HttpDriverDirectory::new(spawn_server(router).await, Duration::from_secs(5)).unwrap();

    let err = client.find_available_driver().await.unwrap_err();
    match err {
        DirectoryError::Remote { operation, status, body } => {
            assert_eq!(operation, "find_available_driver");
            assert_eq!(status, 500);
            assert_eq!(body, "database down");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_directory_times_out() {
    let router = Router::new().route(
        "/drivers",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!([]))
        }),
    );
    let client = HttpDriverDirectory::new(spawn_server(router).await, Duration::from_millis(200)).unwrap();

    let err = client.find_available_driver().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Timeout { operation: "find_available_driver" }));
}

#[tokio::test]
async fn test_malformed_body_is_an_invalid_response() {
    let router = Router::new().route("/drivers", get(|| async { "not json" }));
    let client = HttpDriverDirectory::new(spawn_server(router).await, Duration::from_secs(5)).unwrap();

    let err = client.find_available_driver().await.unwrap_err();
    assert!(matches!(err, DirectoryError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_unreachable_directory_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpDriverDirectory::new(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let err = client.set_driver_availability("d1", true).await.unwrap_err();
    assert!(matches!(
        err,
        DirectoryError::Transport { operation: "set_driver_availability", .. }
    ));
}

struct LastListed;

impl DriverSelectionPolicy for LastListed {
    fn select<'a>(&self, candidates: &'a [DirectoryDriver]) -> Option<&'a DirectoryDriver> {
        candidates.last()
    }
}

#[tokio::test]
async fn test_selection_policy_is_pluggable() {
    let (drivers, client) = directory_with(&["ana", "bruno", "carla"]).await;
    let client = client.with_selector(Arc::new(LastListed));
    let listed = drivers.list(true).await.unwrap();

    let id = client.find_available_driver().await.unwrap();
    assert_eq!(id, listed[2].id.to_string());
}
