use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::utils::errors::{store_error, AppError};

#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Registra un conductor; siempre nace disponible.
    async fn create(&self, name: String) -> Result<Driver, AppError>;

    /// Conductores en orden de registro.
    async fn list(&self, only_available: bool) -> Result<Vec<Driver>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError>;

    /// Devuelve `None` si el conductor no existe.
    async fn set_availability(&self, id: Uuid, is_available: bool) -> Result<Option<Driver>, AppError>;
}

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn create(&self, name: String) -> Result<Driver, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, name, is_available)
            VALUES ($1, $2, TRUE)
            RETURNING id, name, is_available
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Error creating driver", e))?;

        Ok(driver)
    }

    async fn list(&self, only_available: bool) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>(
            r#"
            SELECT id, name, is_available FROM drivers
            WHERE ($1 = FALSE OR is_available = TRUE)
            ORDER BY created_at ASC
            "#,
        )
        .bind(only_available)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Error listing drivers", e))?;

        Ok(drivers)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            "SELECT id, name, is_available FROM drivers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Error finding driver", e))?;

        Ok(driver)
    }

    async fn set_availability(&self, id: Uuid, is_available: bool) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers SET is_available = $2
            WHERE id = $1
            RETURNING id, name, is_available
            "#,
        )
        .bind(id)
        .bind(is_available)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Error updating driver availability", e))?;

        Ok(driver)
    }
}
