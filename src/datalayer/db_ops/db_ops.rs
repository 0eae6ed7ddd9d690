use crate::datalayer::db_ops::constants::DbConfig;
use crate::datalayer::db_ops::db_health::{DatabaseHealth, check_database_health};
use crate::errors::errors::ServiceResult;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use tracing::{error, info};

/// Database connection manager owning the shared pool
#[derive(Clone)]
pub struct DbManager {
    pool: Arc<PgPool>,
}

impl DbManager {
    /// Creates the connection pool from the given configuration
    pub async fn new(config: DbConfig) -> Result<Self, sqlx::Error> {
        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Initializing database connection pool..."
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connection_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect(&config.database_url)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                e
            })?;

        info!("Database connection pool created successfully");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get an Arc clone of the pool for the stores
    pub fn pool_arc(&self) -> Arc<PgPool> {
        Arc::clone(&self.pool)
    }

    /// Health check - verifies database connectivity
    pub async fn health_check(&self) -> Result<DatabaseHealth, sqlx::Error> {
        check_database_health(&self.pool).await
    }

    /// Apply the embedded migrations (schema + protected seed records)
    pub async fn run_migrations(&self) -> ServiceResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(self.pool()).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Graceful shutdown - closes all connections in the pool
    pub async fn shutdown(&self) {
        info!("Shutting down database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }

    /// Test database connection and log pool statistics
    pub async fn test_connection(&self) -> Result<(), sqlx::Error> {
        info!("Testing database connection...");

        let health = self.health_check().await?;

        info!(
            pool_size = health.pool_size,
            idle = health.idle_connections,
            latency_ms = health.latency_ms,
            "Database connection test successful"
        );

        Ok(())
    }
}

/// Initialize database connection at application startup
pub async fn initialize_database() -> Result<DbManager, sqlx::Error> {
    initialize_database_with_config(DbConfig::default()).await
}

/// Initialize database with custom configuration
pub async fn initialize_database_with_config(config: DbConfig) -> Result<DbManager, sqlx::Error> {
    info!("=== Database Initialization Started ===");

    let db_manager = DbManager::new(config).await?;
    db_manager.test_connection().await?;

    info!("=== Database Initialization Completed ===");

    Ok(db_manager)
}
