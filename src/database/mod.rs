pub mod models;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("database unreachable: {0}")]
    Unreachable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Explicitly constructed data-access client. Built once at process start,
/// passed to handlers through axum state, closed at shutdown. There is no
/// module-level pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Build the pool without dialing the server, so the process can start
    /// (and the readiness probe can answer truthfully) while the database
    /// is down.
    pub fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .connect_lazy(&config.url)?;

        info!("database pool configured (max_connections={})", config.max_connections);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Raw connectivity probe backing GET /api/ready.
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Unreachable(e.to_string()))?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}
