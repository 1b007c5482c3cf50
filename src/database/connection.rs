//! Configuración de conexión a PostgreSQL
//!
//! Este módulo abre el pool, verifica la conexión y aplica las migraciones
//! de cada servicio.

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;

static RIDES_MIGRATOR: Migrator = sqlx::migrate!("./migrations/rides");
static DIRECTORY_MIGRATOR: Migrator = sqlx::migrate!("./migrations/directory");

/// Conexión compartida a la base de datos de un servicio
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Crear el pool y comprobar que la base responde
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let masked = mask_database_url(&config.url);
        info!("🔌 Conectando a PostgreSQL: {}", masked);

        let pool = config
            .create_pool()
            .await
            .with_context(|| format!("could not connect to {}", masked))?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .context("database ping failed")?;

        info!("✅ Conectado a PostgreSQL");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ejecutar migraciones del servicio de viajes
    pub async fn run_ride_migrations(&self) -> Result<()> {
        RIDES_MIGRATOR
            .run(&self.pool)
            .await
            .context("ride migrations failed")?;
        info!("📦 Migraciones de viajes aplicadas");
        Ok(())
    }

    /// Ejecutar migraciones del servicio de directorio
    pub async fn run_directory_migrations(&self) -> Result<()> {
        DIRECTORY_MIGRATOR
            .run(&self.pool)
            .await
            .context("directory migrations failed")?;
        info!("📦 Migraciones del directorio aplicadas");
        Ok(())
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.find('@') else {
        return url.to_string();
    };
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    if scheme_end + 3 > at_pos {
        return url.to_string();
    }

    let protocol = &url[..scheme_end + 3];
    let host = &url[at_pos + 1..];
    format!("{}***:***@{}", protocol, host)
}
