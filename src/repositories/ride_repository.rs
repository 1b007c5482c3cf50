use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ride::{NewRide, PaymentStatus, Ride, RideStatus};
use crate::utils::errors::{not_found_error, store_error, AppError};

/// Almacén de viajes.
///
/// Todas las operaciones afectan a un único registro; no hay transacciones
/// que abarquen varios viajes. Las escrituras parciales solo tocan sus
/// columnas y siempre refrescan `updated_at`.
#[async_trait]
pub trait RideRepository: Send + Sync {
    /// Persiste un viaje nuevo y devuelve el registro con su id generado.
    async fn create(&self, ride: NewRide) -> Result<Ride, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ride>, AppError>;

    /// Lista viajes, más recientes primero.
    async fn list(&self, status: Option<RideStatus>) -> Result<Vec<Ride>, AppError>;

    async fn update_status(&self, id: Uuid, status: RideStatus) -> Result<(), AppError>;

    /// Escribe `new` solo si el estado almacenado sigue siendo `expected`.
    ///
    /// Devuelve `false` si otro escritor cambió el estado antes.
    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: RideStatus,
        new: RideStatus,
    ) -> Result<bool, AppError>;

    async fn update_payment_status(&self, id: Uuid, status: PaymentStatus) -> Result<(), AppError>;

    /// Sobrescribe los campos mutables (todo salvo id, precio y created_at).
    async fn replace_fields(&self, id: Uuid, ride: &Ride) -> Result<(), AppError>;
}

pub struct PgRideRepository {
    pool: PgPool,
}

impl PgRideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn ensure_found(rows_affected: u64, id: Uuid) -> Result<(), AppError> {
    if rows_affected == 0 {
        return Err(not_found_error("Ride", &id.to_string()));
    }
    Ok(())
}

#[async_trait]
impl RideRepository for PgRideRepository {
    async fn create(&self, ride: NewRide) -> Result<Ride, AppError> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            INSERT INTO rides (id, passenger_id, driver_id, from_zone, to_zone, price, status, payment_status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(ride.passenger_id)
        .bind(ride.driver_id)
        .bind(ride.from_zone)
        .bind(ride.to_zone)
        .bind(ride.price)
        .bind(ride.status)
        .bind(ride.payment_status)
        .bind(ride.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Error creating ride", e))?;

        Ok(ride)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ride>, AppError> {
        let ride = sqlx::query_as::<_, Ride>("SELECT * FROM rides WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Error finding ride", e))?;

        Ok(ride)
    }

    async fn list(&self, status: Option<RideStatus>) -> Result<Vec<Ride>, AppError> {
        let rides = sqlx::query_as::<_, Ride>(
            r#"
            SELECT * FROM rides
            WHERE ($1::ride_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Error listing rides", e))?;

        Ok(rides)
    }

    async fn update_status(&self, id: Uuid, status: RideStatus) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE rides SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(status)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Error updating ride status", e))?;

        ensure_found(result.rows_affected(), id)
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: RideStatus,
        new: RideStatus,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE rides SET status = $3, updated_at = $4 WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(expected)
        .bind(new)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Error updating ride status", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_payment_status(&self, id: Uuid, status: PaymentStatus) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE rides SET payment_status = $2, updated_at = $3 WHERE id = $1")
                .bind(id)
                .bind(status)
                .bind(Utc::now())
                .execute(&self.pool)
                .await
                .map_err(|e| store_error("Error updating payment status", e))?;

        ensure_found(result.rows_affected(), id)
    }

    async fn replace_fields(&self, id: Uuid, ride: &Ride) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE rides
            SET passenger_id = $2, driver_id = $3, from_zone = $4, to_zone = $5,
                status = $6, payment_status = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&ride.passenger_id)
        .bind(&ride.driver_id)
        .bind(&ride.from_zone)
        .bind(&ride.to_zone)
        .bind(ride.status)
        .bind(ride.payment_status)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Error updating ride", e))?;

        ensure_found(result.rows_affected(), id)
    }
}
