//! Shared utilities and common types for the TripKit server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures and stable error codes
//! - Utility functions (email masking, validation)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, EmailConfig, EmailProvider, Environment, LogFormat,
    LoggingConfig, VerificationConfig,
};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
pub use utils::{email, validation};
