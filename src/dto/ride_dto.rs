use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ride::{PaymentStatus, Ride, RideStatus};
use crate::utils::validation::validate_not_blank;

// Request para solicitar un viaje
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRideRequest {
    #[serde(rename = "passengerId")]
    #[validate(custom = "validate_not_blank")]
    pub passenger_id: String,
    #[validate(custom = "validate_not_blank")]
    pub from_zone: String,
    #[validate(custom = "validate_not_blank")]
    pub to_zone: String,
}

// Request para cambiar el estado de un viaje
#[derive(Debug, Deserialize)]
pub struct UpdateRideStatusRequest {
    pub status: String,
}

// Filtros del listado de viajes
#[derive(Debug, Default, Deserialize)]
pub struct ListRidesQuery {
    pub status: Option<String>,
}

// Response de viaje, con los nombres de campo del contrato público
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideResponse {
    pub id: Uuid,
    #[serde(rename = "passengerId")]
    pub passenger_id: String,
    #[serde(rename = "driverId")]
    pub driver_id: String,
    pub from_zone: String,
    pub to_zone: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub status: RideStatus,
    #[serde(rename = "paymentStatus")]
    pub payment_status: PaymentStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        Self {
            id: ride.id,
            passenger_id: ride.passenger_id,
            driver_id: ride.driver_id,
            from_zone: ride.from_zone,
            to_zone: ride.to_zone,
            price: ride.price,
            status: ride.status,
            payment_status: ride.payment_status,
            created_at: ride.created_at,
            updated_at: ride.updated_at,
        }
    }
}
