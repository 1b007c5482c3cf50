//! Cliente HTTP del directorio de conductores
//!
//! Consulta el servicio de usuarios para obtener un conductor disponible y
//! para cambiar su disponibilidad. Cada llamada está acotada por un timeout
//! y los fallos de transporte se traducen a `DirectoryError`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::services::driver_selection::{DriverSelectionPolicy, FirstListedDriver};
use crate::utils::errors::AppError;

pub const FIND_AVAILABLE_DRIVER: &str = "find_available_driver";
pub const SET_DRIVER_AVAILABILITY: &str = "set_driver_availability";

/// Conductor tal como lo devuelve `GET /drivers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryDriver {
    pub id: String,
    pub name: String,
    pub is_available: bool,
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("no available driver")]
    NoDriverAvailable,

    #[error("{operation} timed out")]
    Timeout { operation: &'static str },

    #[error("{operation} failed: directory returned status {status}: {body}")]
    Remote {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("{operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} failed: invalid response: {message}")]
    InvalidResponse {
        operation: &'static str,
        message: String,
    },
}

impl DirectoryError {
    fn from_reqwest(operation: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DirectoryError::Timeout { operation }
        } else if err.is_decode() {
            DirectoryError::InvalidResponse {
                operation,
                message: err.to_string(),
            }
        } else {
            DirectoryError::Transport {
                operation,
                message: err.to_string(),
            }
        }
    }
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NoDriverAvailable => AppError::NoDriverAvailable,
            other => AppError::DirectoryUnavailable(other.to_string()),
        }
    }
}

/// Capacidad remota del directorio, tal como la consume el motor de viajes.
#[async_trait]
pub trait DriverDirectory: Send + Sync {
    async fn find_available_driver(&self) -> Result<String, DirectoryError>;

    /// Idempotente: repetir el mismo valor no es un error.
    async fn set_driver_availability(
        &self,
        driver_id: &str,
        is_available: bool,
    ) -> Result<(), DirectoryError>;
}

#[derive(Debug, Serialize)]
struct AvailabilityPayload {
    is_available: bool,
}

pub struct HttpDriverDirectory {
    client: Client,
    base_url: String,
    selector: Arc<dyn DriverSelectionPolicy>,
}

impl HttpDriverDirectory {
    /// Crear nuevo cliente con un timeout por llamada
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::Transport {
                operation: "build_client",
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            selector: Arc::new(FirstListedDriver),
        })
    }

    pub fn with_selector(mut self, selector: Arc<dyn DriverSelectionPolicy>) -> Self {
        self.selector = selector;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn error_for_status(
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, DirectoryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(DirectoryError::Remote {
            operation,
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl DriverDirectory for HttpDriverDirectory {
    async fn find_available_driver(&self) -> Result<String, DirectoryError> {
        let url = format!("{}/drivers?available=true", self.base_url);
        debug!("🌐 GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::from_reqwest(FIND_AVAILABLE_DRIVER, e))?;

        let response = Self::error_for_status(FIND_AVAILABLE_DRIVER, response).await?;
        let drivers: Vec<DirectoryDriver> = response
            .json()
            .await
            .map_err(|e| DirectoryError::from_reqwest(FIND_AVAILABLE_DRIVER, e))?;

        let driver = self
            .selector
            .select(&drivers)
            .ok_or(DirectoryError::NoDriverAvailable)?;

        info!(
            "🚕 Conductor seleccionado: {} ({} disponibles)",
            driver.id,
            drivers.len()
        );
        Ok(driver.id.clone())
    }

    async fn set_driver_availability(
        &self,
        driver_id: &str,
        is_available: bool,
    ) -> Result<(), DirectoryError> {
        let url = format!("{}/drivers/{}/status", self.base_url, driver_id);
        debug!("🌐 PATCH {}", url);

        let response = self
            .client
            .patch(&url)
            .json(&AvailabilityPayload { is_available })
            .send()
            .await
            .map_err(|e| DirectoryError::from_reqwest(SET_DRIVER_AVAILABILITY, e))?;

        Self::error_for_status(SET_DRIVER_AVAILABILITY, response).await?;

        info!(
            "🔄 Disponibilidad del conductor {} -> {}",
            driver_id, is_available
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_errors_map_to_app_errors() {
        assert!(matches!(
            AppError::from(DirectoryError::NoDriverAvailable),
            AppError::NoDriverAvailable
        ));

        let err = AppError::from(DirectoryError::Timeout {
            operation: FIND_AVAILABLE_DRIVER,
        });
        assert!(matches!(err, AppError::DirectoryUnavailable(msg) if msg.contains(FIND_AVAILABLE_DRIVER)));
    }

    #[test]
    fn test_base_url_is_normalised() {
        let client = HttpDriverDirectory::new("http://localhost:3000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}
