use std::sync::Arc;

use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::vehicle::repo::seaorm::SeaOrmVehicleRepository;

use crate::auth::JwtPrincipalResolver;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `.env` and configuration (file first, environment second).
pub fn load_config() -> anyhow::Result<AppConfig> {
    dotenv().ok();
    AppConfig::load()
}

/// Public entry: load configuration, then build and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    let cfg = load_config()?;
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    init_logging(LogFormat::parse(&cfg.logging.format));
    // Loading ran before the subscriber existed.
    if let Some(reason) = &cfg.file_error {
        warn!(error = %reason, "config file was skipped; configuration came from the environment");
    }

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }

    let repo = Arc::new(SeaOrmVehicleRepository::new(db));
    let principals = Arc::new(JwtPrincipalResolver::from_config(&cfg.auth));
    let app = routes::build_router(AppState::new(repo, principals), build_cors());

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "fleet tracker listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
