//! Modelo de Ride
//!
//! Este módulo contiene el struct Ride, sus estados y la tabla de
//! transiciones del ciclo de vida de un viaje.
//! Mapea exactamente a la tabla `rides` del schema PostgreSQL.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del viaje - mapea al ENUM ride_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "ride_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RideStatus {
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl RideStatus {
    pub const ALL: [RideStatus; 4] = [
        RideStatus::Assigned,
        RideStatus::InProgress,
        RideStatus::Completed,
        RideStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Assigned => "ASSIGNED",
            RideStatus::InProgress => "IN_PROGRESS",
            RideStatus::Completed => "COMPLETED",
            RideStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RideStatus::Completed | RideStatus::Cancelled)
    }

    /// Tabla de transiciones permitidas
    pub fn can_transition_to(&self, next: RideStatus) -> bool {
        use RideStatus::*;

        matches!(
            (self, next),
            (Assigned, InProgress)
                | (Assigned, Cancelled)
                | (Assigned, Completed)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RideStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RideStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown ride status '{}'", s))
    }
}

/// Estado del pago - mapea al ENUM payment_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Captured,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Captured => "CAPTURED",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ride principal - mapea exactamente a la tabla rides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Ride {
    pub id: Uuid,
    pub passenger_id: String,
    pub driver_id: String,
    pub from_zone: String,
    pub to_zone: String,
    pub price: Decimal,
    pub status: RideStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos de un viaje todavía no persistido; el almacén genera el id
#[derive(Debug, Clone, PartialEq)]
pub struct NewRide {
    pub passenger_id: String,
    pub driver_id: String,
    pub from_zone: String,
    pub to_zone: String,
    pub price: Decimal,
    pub status: RideStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl NewRide {
    /// Todo viaje nace asignado a un conductor y con el pago pendiente
    pub fn assigned(
        passenger_id: String,
        driver_id: String,
        from_zone: String,
        to_zone: String,
        price: Decimal,
    ) -> Self {
        Self {
            passenger_id,
            driver_id,
            from_zone,
            to_zone,
            price,
            status: RideStatus::Assigned,
            payment_status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn into_ride(self, id: Uuid) -> Ride {
        Ride {
            id,
            passenger_id: self.passenger_id,
            driver_id: self.driver_id,
            from_zone: self.from_zone,
            to_zone: self.to_zone,
            price: self.price,
            status: self.status,
            payment_status: self.payment_status,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
