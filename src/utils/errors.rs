//! Sistema de manejo de errores
//!
//! Este módulo define los errores de los servicios de viajes y directorio
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ride::RideStatus;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid ride transition from {from} to {to}")]
    InvalidTransition { from: RideStatus, to: RideStatus },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("No available driver found")]
    NoDriverAvailable,

    #[error("Driver directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
    code: &'static str,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidTransition { .. } | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NoDriverAvailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DirectoryUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AppError::InvalidTransition { .. } => "INVALID_TRANSITION",
            AppError::Conflict(_) => "CONFLICT",
            AppError::NoDriverAvailable => "NO_DRIVER_AVAILABLE",
            AppError::DirectoryUnavailable(_) => "DIRECTORY_UNAVAILABLE",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Los detalles de transporte y de base de datos solo van al log
        let (error, message) = match &self {
            AppError::Validation(msg) => {
                warn!("⚠️ Validation error: {}", msg);
                ("Validation Error", msg.clone())
            }
            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                ("Bad Request", msg.clone())
            }
            AppError::NotFound(msg) => ("Not Found", msg.clone()),
            AppError::MethodNotAllowed => ("Method Not Allowed", "Method not allowed".to_string()),
            AppError::InvalidTransition { .. } => ("Invalid Transition", self.to_string()),
            AppError::Conflict(msg) => {
                warn!("⚠️ Conflict: {}", msg);
                ("Conflict", msg.clone())
            }
            AppError::NoDriverAvailable => {
                warn!("🚕 No available driver found");
                ("Service Unavailable", "No available driver found".to_string())
            }
            AppError::DirectoryUnavailable(msg) => {
                error!("❌ Driver directory error: {}", msg);
                (
                    "Bad Gateway",
                    "An error occurred while communicating with the driver directory".to_string(),
                )
            }
            AppError::Store(msg) => {
                error!("❌ Store error: {}", msg);
                (
                    "Store Error",
                    "An error occurred while accessing the data store".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!("❌ Internal error: {}", msg);
                (
                    "Internal Server Error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error, message, code })).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para envolver errores de almacenamiento con la operación
pub fn store_error(operation: &str, err: impl std::fmt::Display) -> AppError {
    AppError::Store(format!("{}: {}", operation, err))
}
