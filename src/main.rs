//! CornerClub Backend
//!
//! Main application entry point

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use CornerClub::{
    config::Settings,
    database::{self, connection::create_pool, DatabaseService},
    handlers::{build_router, AppState},
    middleware::auth::AuthVerifier,
    middleware::rate_limit::RateLimitMiddleware,
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting CornerClub backend...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = database::DatabaseConfig::from_settings(&settings.database);
    let db_pool = create_pool(&db_config).await?;

    // Run database migrations
    info!("Running database migrations...");
    database::run_migrations(&db_pool).await?;

    // Initialize database service
    let database_service = DatabaseService::new(db_pool.clone());

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(database_service.clone(), settings.clone())?;

    let health = services.health_check().await;
    if !health.is_healthy() {
        for issue in health.get_issues() {
            tracing::warn!(issue = %issue, "Service degraded at startup");
        }
    }

    // Assemble application state and router
    let state = AppState {
        services: Arc::new(services),
        database: database_service,
        pool: db_pool,
        auth: AuthVerifier::new(&settings),
        rate_limit: RateLimitMiddleware::default(),
        settings: settings.clone(),
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host/port configuration")?;
    let listener = TcpListener::bind(addr).await?;

    info!("CornerClub backend listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")?;

    info!("CornerClub backend has been shut down.");

    Ok(())
}
