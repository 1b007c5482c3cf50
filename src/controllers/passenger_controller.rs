use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::dto::passenger_dto::PassengerRequest;
use crate::models::passenger::Passenger;
use crate::repositories::passenger_repository::PassengerRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::parse_identifier;

pub struct PassengerController {
    repository: Arc<dyn PassengerRepository>,
}

impl PassengerController {
    pub fn new(repository: Arc<dyn PassengerRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: PassengerRequest) -> Result<Passenger, AppError> {
        request.validate()?;

        let passenger = self.repository.create(request.name.trim().to_string()).await?;
        info!("🆕 Nuevo pasajero creado: {} (ID: {})", passenger.name, passenger.id);
        Ok(passenger)
    }

    pub async fn list(&self) -> Result<Vec<Passenger>, AppError> {
        let passengers = self.repository.list().await?;
        info!("🔍 Búsqueda de pasajeros -> {} encontrados", passengers.len());
        Ok(passengers)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Passenger, AppError> {
        let uuid = parse_identifier("passenger", id)?;
        self.repository
            .find_by_id(uuid)
            .await?
            .ok_or_else(|| not_found_error("Passenger", id))
    }

    pub async fn update(&self, id: &str, request: PassengerRequest) -> Result<Passenger, AppError> {
        let uuid = parse_identifier("passenger", id)?;
        request.validate()?;

        let passenger = self
            .repository
            .update(uuid, request.name.trim().to_string())
            .await?
            .ok_or_else(|| not_found_error("Passenger", id))?;

        info!("✏️ Pasajero {} actualizado", id);
        Ok(passenger)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let uuid = parse_identifier("passenger", id)?;
        if !self.repository.delete(uuid).await? {
            return Err(not_found_error("Passenger", id));
        }

        info!("🗑️ Pasajero {} eliminado", id);
        Ok(())
    }
}
