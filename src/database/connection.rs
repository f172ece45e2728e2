use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::AppConfig;

pub type DbPool = PgPool;

#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

static SHARED_POOL: OnceCell<DbPool> = OnceCell::const_new();

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Process-wide pool, created on first use and reused until exit.
///
/// Concurrent first callers wait on the same initialization instead of
/// each opening a pool of their own.
pub async fn shared_pool() -> Result<&'static DbPool, ConnectionError> {
    SHARED_POOL
        .get_or_try_init(|| async {
            let config = AppConfig::load()?;
            info!(
                "Creating shared connection pool (max {} connections)",
                config.database_max_connections
            );
            let pool = create_pool(&config.database_url, config.database_max_connections).await?;
            Ok(pool)
        })
        .await
}
