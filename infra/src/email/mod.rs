//! Email Service Module
//!
//! Delivers verification codes by email. Two providers are available:
//! a mock that only logs (development and tests) and an HTTP mail API client.
//! Recipient addresses are masked in every log line and codes never appear
//! in logs.

pub mod email_service;
pub mod http_email;
pub mod mock_email;
pub mod notifier;

pub use email_service::{verification_message, EmailMessage, EmailService};
pub use http_email::HttpEmailService;
pub use mock_email::MockEmailService;
pub use notifier::EmailNotifier;

use crate::config::{EmailConfig, EmailProvider};
use crate::InfrastructureError;


/// Create an email service based on configuration
///
/// # Returns
///
/// A boxed email service implementation, or a configuration error when the
/// HTTP provider is selected without an endpoint
pub fn create_email_service(config: &EmailConfig) -> Result<Box<dyn EmailService>, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => {
            tracing::info!(provider = "mock", "Using mock email service");
            Ok(Box::new(MockEmailService::new()))
        }
        EmailProvider::Http => {
            let service = HttpEmailService::new(config.clone())?;
            tracing::info!(provider = "http", endpoint = %config.api_url, "Using HTTP email service");
            Ok(Box::new(service))
        }
    }
}
