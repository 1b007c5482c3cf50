#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use ridenow::clients::{DirectoryError, DriverDirectory};
use ridenow::config::{DatabaseConfig, EnvironmentConfig};
use ridenow::repositories::InMemoryRideRepository;
use ridenow::services::{FixedPricing, PaymentError, PaymentGateway, RideLifecycleService};

pub const TEST_PRICE: u32 = 25;

/// Configuración mínima; la base de datos no se usa en estas pruebas
pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig::new("postgres://unused@localhost/unused"),
        users_service_url: "http://127.0.0.1:1".to_string(),
        directory_timeout: Duration::from_secs(1),
        max_concurrent_requests: 64,
        cors_origins: Vec::new(),
    }
}

/// Directorio falso: conductores disponibles en orden y contadores de llamadas
#[derive(Default)]
pub struct FakeDirectory {
    available: Mutex<Vec<String>>,
    pub fail_find: AtomicBool,
    pub fail_set: AtomicBool,
    availability_calls: Mutex<Vec<(String, bool)>>,
}

impl FakeDirectory {
    pub fn with_drivers(ids: &[&str]) -> Self {
        let directory = Self::default();
        *directory.available.lock().unwrap() = ids.iter().map(|id| id.to_string()).collect();
        directory
    }

    pub fn availability_calls(&self) -> Vec<(String, bool)> {
        self.availability_calls.lock().unwrap().clone()
    }

    pub fn is_available(&self, id: &str) -> bool {
        self.available.lock().unwrap().iter().any(|d| d == id)
    }
}

#[async_trait]
impl DriverDirectory for FakeDirectory {
    async fn find_available_driver(&self) -> Result<String, DirectoryError> {
        if self.fail_find.load(Ordering::SeqCst) {
            return Err(DirectoryError::Timeout {
                operation: "find_available_driver",
            });
        }
        self.available
            .lock()
            .unwrap()
            .first()
            .cloned()
            .ok_or(DirectoryError::NoDriverAvailable)
    }

    async fn set_driver_availability(
        &self,
        driver_id: &str,
        is_available: bool,
    ) -> Result<(), DirectoryError> {
        self.availability_calls
            .lock()
            .unwrap()
            .push((driver_id.to_string(), is_available));

        if self.fail_set.load(Ordering::SeqCst) {
            return Err(DirectoryError::Remote {
                operation: "set_driver_availability",
                status: 500,
                body: "boom".to_string(),
            });
        }

        let mut available = self.available.lock().unwrap();
        available.retain(|id| id != driver_id);
        if is_available {
            available.push(driver_id.to_string());
        }
        Ok(())
    }
}

/// Pasarela que cuenta capturas y puede fallar o tardar
#[derive(Default)]
pub struct CountingPaymentGateway {
    captures: AtomicUsize,
    pub fail: AtomicBool,
    pub delay: Option<Duration>,
}

impl CountingPaymentGateway {
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for CountingPaymentGateway {
    async fn capture(&self, ride_id: Uuid, _amount: Decimal) -> Result<(), PaymentError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.captures.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(PaymentError::Declined {
                ride_id,
                reason: "card expired".to_string(),
            });
        }
        Ok(())
    }
}

/// Motor de viajes con todas sus dependencias a la vista
pub struct Harness {
    pub rides: Arc<InMemoryRideRepository>,
    pub directory: Arc<FakeDirectory>,
    pub payments: Arc<CountingPaymentGateway>,
    pub service: Arc<RideLifecycleService>,
}

impl Harness {
    pub fn new(directory: FakeDirectory) -> Self {
        Self::with_payments(directory, CountingPaymentGateway::default())
    }

    pub fn with_payments(directory: FakeDirectory, payments: CountingPaymentGateway) -> Self {
        let rides = Arc::new(InMemoryRideRepository::new());
        let directory = Arc::new(directory);
        let payments = Arc::new(payments);
        let service = Arc::new(RideLifecycleService::new(
            rides.clone(),
            directory.clone(),
            Arc::new(FixedPricing(Decimal::from(TEST_PRICE))),
            payments.clone(),
        ));

        Self {
            rides,
            directory,
            payments,
            service,
        }
    }
}

/// Cliente de pruebas sobre el router, sin abrir sockets
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(raw) => {
                builder = builder.header("content-type", "application/json");
                Body::from(raw.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(&body.to_string())).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(&body.to_string())).await
    }

    pub async fn patch(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(&body.to_string())).await
    }
}

/// Levanta un router en un puerto efímero y devuelve su URL base
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
