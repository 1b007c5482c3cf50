//! Shared application state
//!
//! Este módulo define el estado compartido de cada servicio que se pasa
//! a través del router de Axum. No contiene estado mutable de viajes:
//! todo vive en el almacén.

use std::sync::Arc;

use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::passenger_repository::PassengerRepository;
use crate::services::ride_lifecycle_service::RideLifecycleService;

/// Estado del servicio de viajes
#[derive(Clone)]
pub struct AppState {
    pub rides: Arc<RideLifecycleService>,
}

impl AppState {
    pub fn new(rides: RideLifecycleService) -> Self {
        Self {
            rides: Arc::new(rides),
        }
    }
}

/// Estado del servicio de directorio (conductores y pasajeros)
#[derive(Clone)]
pub struct DirectoryState {
    pub drivers: Arc<dyn DriverRepository>,
    pub passengers: Arc<dyn PassengerRepository>,
}

impl DirectoryState {
    pub fn new(drivers: Arc<dyn DriverRepository>, passengers: Arc<dyn PassengerRepository>) -> Self {
        Self { drivers, passengers }
    }
}
