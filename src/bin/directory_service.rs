use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ridenow::config::environment::EnvironmentConfig;
use ridenow::database::DatabaseConnection;
use ridenow::repositories::{PgDriverRepository, PgPassengerRepository};
use ridenow::routes::build_directory_app;
use ridenow::server::serve;
use ridenow::state::DirectoryState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("👥 RideNow - Servicio de usuarios");
    info!("================================");

    let config = EnvironmentConfig::directory_service()?;
    info!("⚙️ Entorno: {}", config.environment);

    let db = DatabaseConnection::connect(&config.database).await?;
    db.run_directory_migrations().await?;

    let state = DirectoryState::new(
        Arc::new(PgDriverRepository::new(db.pool().clone())),
        Arc::new(PgPassengerRepository::new(db.pool().clone())),
    );
    let app = build_directory_app(state, &config);

    info!("🔍 Endpoints disponibles:");
    info!("   POST   /drivers - Registrar conductor");
    info!("   GET    /drivers - Listar conductores (?available=true)");
    info!("   GET    /drivers/:id - Obtener conductor");
    info!("   PATCH  /drivers/:id/status - Cambiar disponibilidad");
    info!("   POST   /passengers - Registrar pasajero");
    info!("   GET    /passengers - Listar pasajeros");
    info!("   GET    /passengers/:id - Obtener pasajero");
    info!("   PUT    /passengers/:id - Actualizar pasajero");
    info!("   DELETE /passengers/:id - Eliminar pasajero");

    serve(app, &config.server_address()).await
}
