use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use rr_api::{create_app, AppState};
use rr_core::services::auth::{AuthService, AuthServiceConfig};
use rr_core::services::catalog::CatalogService;
use rr_core::services::media::MediaIntake;
use rr_core::services::rental::RentalService;
use rr_core::services::token::{TokenService, TokenServiceConfig};
use rr_infra::{
    DatabasePool, LocalMediaStore, MySqlCarRepository, MySqlRentalRepository, MySqlUserRepository,
};
use rr_shared::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // RUST_LOG wins over the per-environment default
    let default_filter = Environment::from_env().default_log_filter();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    tracing::info!("Starting Rent-A-Ride API server");

    let config = AppConfig::from_env();

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("Failed to connect to the database")?;
    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("Failed to run database migrations")?;
    }
    let pool = database.get_pool().clone();

    let media_store = LocalMediaStore::new(&config.media);
    media_store
        .ensure_dir()
        .await
        .context("Failed to prepare the upload directory")?;
    let media = Arc::new(MediaIntake::new(Arc::new(media_store)));

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));

    let state = web::Data::new(AppState {
        auth_service: Arc::new(AuthService::new(
            Arc::new(MySqlUserRepository::new(pool.clone())),
            Arc::clone(&token_service),
            Arc::clone(&media),
            AuthServiceConfig::from(&config.auth.password),
        )),
        catalog_service: Arc::new(CatalogService::new(
            Arc::new(MySqlCarRepository::new(pool.clone())),
            Arc::clone(&media),
        )),
        rental_service: Arc::new(RentalService::new(
            Arc::new(MySqlRentalRepository::new(pool)),
            Arc::clone(&media),
        )),
        token_service,
    });

    let bind_address = config.server.bind_address();
    tracing::info!(
        address = %bind_address,
        environment = ?config.environment,
        "Server will bind"
    );

    let cors = config.server.cors.clone();
    let media_config = config.media.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &cors, &media_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    tracing::info!("Server stopped");
    Ok(())
}
