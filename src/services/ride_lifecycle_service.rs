//! Motor del ciclo de vida de los viajes
//!
//! Coordina la creación de viajes, las transiciones de estado y los efectos
//! secundarios ligados a ellas (reserva y liberación del conductor en el
//! directorio, captura del pago al completar).
//!
//! Los efectos secundarios no críticos son "best effort": si fallan se
//! registran en el log y la petición principal sigue adelante.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::clients::driver_directory_client::DriverDirectory;
use crate::models::ride::{NewRide, PaymentStatus, Ride, RideStatus};
use crate::repositories::ride_repository::RideRepository;
use crate::services::payment_service::{payment_status_for, PaymentGateway};
use crate::services::pricing_service::PricingStrategy;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::parse_identifier;

/// Datos de la solicitud de un viaje
#[derive(Debug, Clone)]
pub struct RideRequest {
    pub passenger_id: String,
    pub from_zone: String,
    pub to_zone: String,
}

pub struct RideLifecycleService {
    rides: Arc<dyn RideRepository>,
    directory: Arc<dyn DriverDirectory>,
    pricing: Arc<dyn PricingStrategy>,
    payments: Arc<dyn PaymentGateway>,
}

impl RideLifecycleService {
    pub fn new(
        rides: Arc<dyn RideRepository>,
        directory: Arc<dyn DriverDirectory>,
        pricing: Arc<dyn PricingStrategy>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            rides,
            directory,
            pricing,
            payments,
        }
    }

    /// Crea un viaje asignado a un conductor disponible.
    ///
    /// Si no hay conductor o el directorio falla no se persiste nada.
    pub async fn create_ride(&self, request: RideRequest) -> AppResult<Ride> {
        let price = self.pricing.quote(&request.from_zone, &request.to_zone);
        if price.is_sign_negative() {
            return Err(AppError::Internal(format!(
                "pricing returned a negative amount: {}",
                price
            )));
        }

        let driver_id = self.directory.find_available_driver().await.map_err(|e| {
            warn!("⚠️ No se pudo obtener un conductor: {}", e);
            AppError::from(e)
        })?;

        let ride = self
            .rides
            .create(NewRide::assigned(
                request.passenger_id,
                driver_id,
                request.from_zone,
                request.to_zone,
                price,
            ))
            .await?;

        // Best effort: un fallo aquí deja al conductor marcado como disponible
        if let Err(e) = self
            .directory
            .set_driver_availability(&ride.driver_id, false)
            .await
        {
            warn!(
                "⚠️ No se pudo reservar al conductor {} para el viaje {}: {}",
                ride.driver_id, ride.id, e
            );
        }

        info!(
            "🆕 Viaje creado: id={}, pasajero={}, conductor={}, precio={}",
            ride.id, ride.passenger_id, ride.driver_id, ride.price
        );
        Ok(ride)
    }

    pub async fn get_ride(&self, id: &str) -> AppResult<Ride> {
        let id = parse_identifier("ride", id)?;
        self.find_existing(id).await
    }

    pub async fn list_rides(&self, status: Option<RideStatus>) -> AppResult<Vec<Ride>> {
        self.rides.list(status).await
    }

    /// Aplica una transición de estado y, al completar, captura el pago y
    /// libera al conductor.
    ///
    /// La escritura del estado es condicional sobre el estado leído, de modo
    /// que los efectos de la finalización se ejecutan como mucho una vez.
    pub async fn update_ride_status(&self, id: &str, new_status: RideStatus) -> AppResult<Ride> {
        let id = parse_identifier("ride", id)?;
        let current = self.find_existing(id).await?;

        if current.status == new_status {
            return Self::settled(current);
        }

        if !current.status.can_transition_to(new_status) {
            return Err(AppError::InvalidTransition {
                from: current.status,
                to: new_status,
            });
        }

        let applied = self
            .rides
            .compare_and_set_status(id, current.status, new_status)
            .await?;

        if !applied {
            // Otro escritor se adelantó
            let latest = self.find_existing(id).await?;
            if latest.status == new_status {
                return Self::settled(latest);
            }
            return Err(AppError::Conflict(format!(
                "ride {} changed to {} while applying {}",
                id, latest.status, new_status
            )));
        }

        info!(
            "🔄 Estado del viaje {} actualizado: {} -> {}",
            id, current.status, new_status
        );

        if new_status == RideStatus::Completed {
            self.run_completion_side_effects(&current).await;
        }

        self.rides.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(format!("ride {} could not be re-read after update", id))
        })
    }

    /// Un viaje COMPLETED con el pago aún PENDING tiene la finalización en
    /// curso en otra petición.
    fn settled(ride: Ride) -> AppResult<Ride> {
        if ride.status == RideStatus::Completed && ride.payment_status == PaymentStatus::Pending {
            return Err(AppError::Conflict(format!(
                "completion of ride {} is still in progress",
                ride.id
            )));
        }
        Ok(ride)
    }

    async fn run_completion_side_effects(&self, ride: &Ride) {
        let capture = self.payments.capture(ride.id, ride.price).await;
        if let Err(e) = &capture {
            error!("❌ Falló la captura del pago del viaje {}: {}", ride.id, e);
        }

        let payment_status = payment_status_for(&capture);
        if let Err(e) = self.rides.update_payment_status(ride.id, payment_status).await {
            error!(
                "❌ No se pudo guardar el estado de pago {} del viaje {}: {}",
                payment_status, ride.id, e
            );
        }

        if let Err(e) = self
            .directory
            .set_driver_availability(&ride.driver_id, true)
            .await
        {
            warn!(
                "⚠️ No se pudo liberar al conductor {} tras el viaje {}: {}",
                ride.driver_id, ride.id, e
            );
        }
    }

    async fn find_existing(&self, id: Uuid) -> AppResult<Ride> {
        self.rides
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Ride", &id.to_string()))
    }
}
