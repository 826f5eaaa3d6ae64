use anyhow::{Context, Result};
use product::{
    config::myconfig::{Config, DatabaseConfig},
    handler::AppRouter,
    repository::ProductRepository,
    state::AppState,
};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, TelemetryProviders, init_logger},
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match config.otel_endpoint.as_deref() {
        Some(endpoint) => Some(
            Telemetry::new("product-service", endpoint)
                .init()
                .context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    let _log_guard = init_logger(
        "product-service",
        config.is_dev,
        config.enable_file_log,
        telemetry.as_ref().map(|providers| &providers.logger),
    );

    info!("🚀 Starting Product Service initialization...");

    let repository = match &config.database {
        Some(database) => {
            let pool = connect(database).await?;

            if config.run_migrations {
                run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                info!("✅ Database migrations applied");
            }

            ProductRepository::postgres(pool)
        }
        None => {
            warn!("⚠️  DATABASE_URL not set, using in-memory product store");
            ProductRepository::in_memory()
        }
    };

    let state = AppState::new(repository);

    info!("✅ Application setup completed successfully.");

    let result = AppRouter::serve(config.port, state).await;

    shutdown(telemetry);

    result
}

async fn connect(database: &DatabaseConfig) -> Result<ConnectionPool> {
    ConnectionManager::new_pool(&database.url, database.min_conn, database.max_conn)
        .await
        .context("Failed to initialize database pool")
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn shutdown(telemetry: Option<TelemetryProviders>) {
    info!("🛑 Shutting down Product Service...");

    if let Some(Err(e)) = telemetry.map(TelemetryProviders::shutdown) {
        error!("Failed to shutdown telemetry: {e}");
    }

    info!("✅ Product Service shutdown complete.");
}
