//! Captura de pagos
//!
//! No hay pasarela real: `SimulatedPaymentGateway` registra la captura y
//! siempre la da por buena.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::ride::PaymentStatus;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("payment declined for ride {ride_id}: {reason}")]
    Declined { ride_id: Uuid, reason: String },

    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Finaliza el cobro de un viaje completado.
    async fn capture(&self, ride_id: Uuid, amount: Decimal) -> Result<(), PaymentError>;
}

/// Resultado de la captura tal como se persiste en el viaje
pub fn payment_status_for(result: &Result<(), PaymentError>) -> PaymentStatus {
    match result {
        Ok(()) => PaymentStatus::Captured,
        Err(_) => PaymentStatus::Failed,
    }
}

#[derive(Debug, Default, Clone)]
pub struct SimulatedPaymentGateway;

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn capture(&self, ride_id: Uuid, amount: Decimal) -> Result<(), PaymentError> {
        info!("💳 Pago capturado para el viaje {}: {:.2}", ride_id, amount);
        Ok(())
    }
}
