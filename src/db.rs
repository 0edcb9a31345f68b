use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::info;

use crate::config::AppConfig;

/// Type alias for a database connection pool.
pub type DbPool = DatabaseConnection;

/// Establishes the connection pool from application configuration.
pub async fn connect(config: &AppConfig) -> Result<DbPool, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(!config.is_production());

    let pool = Database::connect(options).await?;
    info!("database connection established");
    Ok(pool)
}

/// Lightweight liveness check used by the health endpoint.
pub async fn ping(pool: &DbPool) -> Result<(), DbErr> {
    pool.ping().await
}
