/**
 * Server Configuration
 *
 * This module turns an `AppConfig` into the runtime services the server
 * needs, focusing on store selection.
 *
 * # Store Selection
 *
 * - `DATABASE_URL` unset: the in-memory store is used and a warning is
 *   logged; nothing persists across restarts.
 * - `DATABASE_URL` set: a PostgreSQL pool is opened and the migrations in
 *   `migrations/` are applied. Failure to connect or migrate stops startup
 *   rather than silently falling back to memory.
 */

use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;

use crate::backend::store::{MemoryStore, PgStore, Store};
use crate::shared::{AppConfig, ConfigError};

/// Errors that prevent the server from starting
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to run database migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Open the store named by the configuration
pub async fn load_store(config: &AppConfig) -> Result<Arc<dyn Store>, ServerError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory store; data will not persist.");
        return Ok(Arc::new(MemoryStore::new()));
    };

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        e
    })?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        e
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(Arc::new(PgStore::new(pool)))
}
