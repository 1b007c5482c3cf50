use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::dto::driver_dto::{CreateDriverRequest, DriverListQuery, UpdateDriverStatusRequest};
use crate::models::driver::Driver;
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::parse_identifier;

pub struct DriverController {
    repository: Arc<dyn DriverRepository>,
}

impl DriverController {
    pub fn new(repository: Arc<dyn DriverRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: CreateDriverRequest) -> Result<Driver, AppError> {
        request.validate()?;

        let driver = self.repository.create(request.name.trim().to_string()).await?;
        info!("🆕 Nuevo conductor creado: {} (ID: {})", driver.name, driver.id);
        Ok(driver)
    }

    pub async fn list(&self, query: &DriverListQuery) -> Result<Vec<Driver>, AppError> {
        let drivers = self.repository.list(query.only_available()).await?;
        info!(
            "🔍 Búsqueda de conductores (available={}) -> {} encontrados",
            query.available.as_deref().unwrap_or(""),
            drivers.len()
        );
        Ok(drivers)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Driver, AppError> {
        let uuid = parse_identifier("driver", id)?;
        self.repository
            .find_by_id(uuid)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))
    }

    pub async fn set_availability(
        &self,
        id: &str,
        request: UpdateDriverStatusRequest,
    ) -> Result<Driver, AppError> {
        let uuid = parse_identifier("driver", id)?;
        let driver = self
            .repository
            .set_availability(uuid, request.is_available)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))?;

        info!("🔄 Conductor {} -> disponible: {}", id, driver.is_available);
        Ok(driver)
    }
}
