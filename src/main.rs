use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ridenow::clients::HttpDriverDirectory;
use ridenow::config::environment::EnvironmentConfig;
use ridenow::database::DatabaseConnection;
use ridenow::repositories::PgRideRepository;
use ridenow::routes::build_ride_app;
use ridenow::server::serve;
use ridenow::services::{RandomZonePricing, RideLifecycleService, SimulatedPaymentGateway};
use ridenow::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚕 RideNow - Servicio de viajes");
    info!("==============================");

    let config = EnvironmentConfig::ride_service()?;
    info!("⚙️ Entorno: {}", config.environment);

    let db = DatabaseConnection::connect(&config.database).await?;
    db.run_ride_migrations().await?;

    let directory = HttpDriverDirectory::new(&config.users_service_url, config.directory_timeout)?;
    info!(
        "📇 Directorio de conductores: {} (timeout {:?})",
        directory.base_url(),
        config.directory_timeout
    );

    let service = RideLifecycleService::new(
        Arc::new(PgRideRepository::new(db.pool().clone())),
        Arc::new(directory),
        Arc::new(RandomZonePricing::default()),
        Arc::new(SimulatedPaymentGateway),
    );

    let app = build_ride_app(AppState::new(service), &config);

    info!("🔍 Endpoints disponibles:");
    info!("   GET   /health - Health check");
    info!("   POST  /rides - Solicitar viaje");
    info!("   GET   /rides - Listar viajes (?status=)");
    info!("   GET   /rides/:id - Obtener viaje");
    info!("   PATCH /rides/:id/status - Cambiar estado del viaje");

    serve(app, &config.server_address()).await
}
