//! Modelo de Driver
//!
//! Conductor registrado en el directorio y su bandera de disponibilidad.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Driver - mapea a la tabla drivers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub is_available: bool,
}
