//! PostgreSQL connection pool management.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

use crate::domain::models::DatabaseConfig;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Failed to create pool: {0}")]
    PoolCreationFailed(#[source] sqlx::Error),
    #[error("Connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    /// Connections opened eagerly and kept open; a floor, not an idle cap.
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 50,
            min_connections: 25,
            max_lifetime: Duration::from_secs(300),
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            max_lifetime: Duration::from_secs(config.max_lifetime_secs),
            acquire_timeout: Duration::from_secs(config.acquire_timeout_secs),
        }
    }
}

/// Build a pool and open its first connection.
pub async fn create_pool(
    options: PgConnectOptions,
    config: Option<PoolConfig>,
) -> Result<PgPool, ConnectionError> {
    let config = config.unwrap_or_default();

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .max_lifetime(config.max_lifetime)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await
        .map_err(ConnectionError::PoolCreationFailed)
}

pub async fn verify_connection(pool: &PgPool) -> Result<(), ConnectionError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(ConnectionError::ConnectionFailed)?;
    Ok(())
}
