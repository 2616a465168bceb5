//! MySQL connection pool for the ticket store
//!
//! Statements are logged at debug level, and at warn level once they exceed
//! `DatabaseConfig::slow_query_threshold` milliseconds.

use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{ConnectOptions, MySqlPool};
use tracing::log::LevelFilter;

use crate::config::DatabaseConfig;
use crate::InfrastructureError;

/// Parse the connection URL and attach statement logging
pub(crate) fn connect_options(config: &DatabaseConfig) -> Result<MySqlConnectOptions, InfrastructureError> {
    let slow_after = Duration::from_millis(config.slow_query_threshold);

    MySqlConnectOptions::from_str(&config.url)
        .map(|options| {
            options
                .log_statements(LevelFilter::Debug)
                .log_slow_statements(LevelFilter::Warn, slow_after)
        })
        .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))
}

/// Pool sizing and connection lifetimes
pub(crate) fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .max_lifetime(Duration::from_secs(config.max_lifetime))
        .test_before_acquire(true)
}

/// Shared handle to the ticket database
///
/// ```no_run
/// use tk_infra::config::DatabaseConfig;
/// use tk_infra::database::DatabasePool;
///
/// # async fn open() -> Result<(), tk_infra::InfrastructureError> {
/// let db = DatabasePool::new(DatabaseConfig::new("mysql://app@localhost/tripkit")).await?;
/// db.health_check().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Open the pool, connecting eagerly so a bad URL or unreachable server
    /// fails at startup
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = connect_options(&config)?;
        tracing::info!(max_connections = config.max_connections, "Opening ticket database pool");

        let pool = pool_options(&config).connect_with(options).await.map_err(|e| {
            tracing::error!(error = %e, "Ticket database unreachable");
            InfrastructureError::Database(e)
        })?;

        Ok(Self { pool })
    }

    /// Underlying SQLx pool, handed to repositories
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Round-trip a trivial query
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let alive: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Ticket database health check failed");
                InfrastructureError::Database(e)
            })?;

        Ok(alive == 1)
    }

    pub fn get_statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        }
    }

    /// Drain the pool on shutdown
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Ticket database pool closed");
    }
}

/// Snapshot of pool occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

impl PoolStatistics {
    /// Connections currently checked out
    pub fn in_use(&self) -> u32 {
        self.connections.saturating_sub(self.idle_connections as u32)
    }
}

impl std::fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} connections ({} idle, {} in use)",
            self.connections,
            self.max_connections,
            self.idle_connections,
            self.in_use()
        )
    }
}
