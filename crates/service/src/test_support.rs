#![cfg(test)]
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Migrations run once per test process.
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn test_config() -> Option<configs::DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let _ = dotenvy::dotenv();
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(configs::DatabaseConfig { url, min_connections: 1, acquire_timeout_secs: 10, ..Default::default() })
}

/// A migrated connection, or `None` when no database is configured.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    let Some(cfg) = test_config() else { return Ok(None) };
    let migrate_cfg = &cfg;
    MIGRATED
        .get_or_try_init(|| async move {
            let db = connect_with_config(migrate_cfg).await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;
    // Fresh connection bound to the current test's runtime
    Ok(Some(connect_with_config(&cfg).await?))
}
