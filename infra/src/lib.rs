//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the TripKit server.
//! It provides concrete implementations for the ports declared in `tk_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL connection pool and ticket repository using SQLx
//! - **Email**: Verification code delivery (mock and HTTP mail API)
//! - **Telemetry**: Tracing subscriber setup
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use std::sync::Arc;

// Re-export core types for convenience
pub use tk_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email module - Verification code delivery
pub mod email;

/// Telemetry module - Tracing subscriber setup
pub mod telemetry;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration types consumed by infrastructure services
    pub use tk_shared::config::{
        AppConfig, DatabaseConfig, EmailConfig, EmailProvider, Environment, LogFormat,
        LoggingConfig, VerificationConfig,
    };
}

#[cfg(feature = "mysql")]
use tk_core::services::{AccountVerificationService, TicketService, TicketServiceConfig};

#[cfg(feature = "mysql")]
use crate::database::{DatabasePool, MySqlTicketRepository};
use crate::email::EmailNotifier;

/// Infrastructure service container
#[cfg(feature = "mysql")]
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Shared connection pool
    pub database: DatabasePool,
    /// Ticket persistence
    pub ticket_repository: Arc<MySqlTicketRepository>,
    /// Code delivery
    pub notifier: Arc<EmailNotifier>,
}

#[cfg(feature = "mysql")]
impl InfrastructureServices {
    /// Build a ticket service over the MySQL repository
    pub fn ticket_service(&self, config: &config::VerificationConfig) -> TicketService<MySqlTicketRepository> {
        TicketService::new(self.ticket_repository.clone(), TicketServiceConfig::from(config))
    }

    /// Build the account verification flows over the MySQL repository and
    /// the configured email provider
    pub fn account_verification(
        &self,
        config: &config::VerificationConfig,
    ) -> AccountVerificationService<MySqlTicketRepository, EmailNotifier> {
        AccountVerificationService::new(Arc::new(self.ticket_service(config)), self.notifier.clone())
    }
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - Database connection pool
/// - MySQL ticket repository
/// - Email delivery client
#[cfg(feature = "mysql")]
pub async fn initialize(config: &config::AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services...");

    let database = DatabasePool::new(config.database.clone()).await?;
    let ticket_repository = Arc::new(MySqlTicketRepository::new(database.get_pool().clone()));
    let notifier = Arc::new(EmailNotifier::new(email::create_email_service(&config.email)?));

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices {
        database,
        ticket_repository,
        notifier,
    })
}

/// Load application configuration from the environment
///
/// Reads `.env.<environment>` and then `.env` when present; variables
/// already set in the process win over both files.
pub fn load_config() -> Result<config::AppConfig, InfrastructureError> {
    let env_file = config::Environment::from_env().env_file();
    if dotenvy::from_filename(&env_file).is_ok() {
        tracing::debug!(file = %env_file, "Loaded environment file");
    }
    dotenvy::dotenv().ok();

    let config = config::AppConfig::from_env();
    validate_config(&config)?;
    Ok(config)
}

/// Reject configurations that cannot work at runtime
pub fn validate_config(config: &config::AppConfig) -> Result<(), InfrastructureError> {
    if config.verification.max_code_attempts == 0 {
        return Err(InfrastructureError::Config(
            "TICKET_CODE_MAX_ATTEMPTS must be at least 1".to_string(),
        ));
    }
    if config.email.provider == config::EmailProvider::Http && config.email.api_url.is_empty() {
        return Err(InfrastructureError::Config(
            "EMAIL_API_URL is required for the http email provider".to_string(),
        ));
    }
    Ok(())
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),
}
