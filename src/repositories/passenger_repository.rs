use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::passenger::Passenger;
use crate::utils::errors::{store_error, AppError};

#[async_trait]
pub trait PassengerRepository: Send + Sync {
    async fn create(&self, name: String) -> Result<Passenger, AppError>;

    async fn list(&self) -> Result<Vec<Passenger>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Passenger>, AppError>;

    /// Devuelve `None` si el pasajero no existe.
    async fn update(&self, id: Uuid, name: String) -> Result<Option<Passenger>, AppError>;

    /// Devuelve `false` si no había nada que borrar.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

pub struct PgPassengerRepository {
    pool: PgPool,
}

impl PgPassengerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PassengerRepository for PgPassengerRepository {
    async fn create(&self, name: String) -> Result<Passenger, AppError> {
        let now = Utc::now();
        let passenger = sqlx::query_as::<_, Passenger>(
            r#"
            INSERT INTO passengers (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Error creating passenger", e))?;

        Ok(passenger)
    }

    async fn list(&self) -> Result<Vec<Passenger>, AppError> {
        let passengers =
            sqlx::query_as::<_, Passenger>("SELECT * FROM passengers ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| store_error("Error listing passengers", e))?;

        Ok(passengers)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Passenger>, AppError> {
        let passenger = sqlx::query_as::<_, Passenger>("SELECT * FROM passengers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Error finding passenger", e))?;

        Ok(passenger)
    }

    async fn update(&self, id: Uuid, name: String) -> Result<Option<Passenger>, AppError> {
        let passenger = sqlx::query_as::<_, Passenger>(
            r#"
            UPDATE passengers SET name = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Error updating passenger", e))?;

        Ok(passenger)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM passengers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Error deleting passenger", e))?;

        Ok(result.rows_affected() > 0)
    }
}
