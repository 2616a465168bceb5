//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::TicketError;

use thiserror::Error;
use tk_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Notification delivery failed: {message}")]
    Notification { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Ticket(#[from] TicketError),
}

impl DomainError {
    /// Stable error code for API clients
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Notification { .. } => error_codes::EMAIL_ERROR,
            DomainError::Conflict { .. } | DomainError::Internal { .. } => {
                error_codes::INTERNAL_ERROR
            }
            DomainError::Ticket(err) => match err {
                TicketError::RateLimited { .. } => error_codes::RATE_LIMIT_EXCEEDED,
                TicketError::NotFound | TicketError::Unauthorized => {
                    error_codes::VERIFICATION_CODE_INVALID
                }
                TicketError::Expired => error_codes::VERIFICATION_CODE_EXPIRED,
                TicketError::CodeSpaceExhausted { .. } => error_codes::INTERNAL_ERROR,
            },
        }
    }

    /// Returns the ticket error if this is one
    pub fn as_ticket_error(&self) -> Option<&TicketError> {
        match self {
            DomainError::Ticket(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Ticket(err @ TicketError::RateLimited { seconds_remaining }) => {
                ErrorResponse::new(self.error_code(), err.public_message())
                    .add_detail("retry_after", seconds_remaining)
            }
            DomainError::Ticket(err) => ErrorResponse::new(self.error_code(), err.public_message()),
            DomainError::Validation { message } => ErrorResponse::new(self.error_code(), message),
            DomainError::NotFound { resource } => {
                ErrorResponse::new(self.error_code(), format!("{} not found", resource))
            }
            DomainError::Notification { .. } => ErrorResponse::new(
                self.error_code(),
                "Unable to deliver the verification code. Please try again later",
            ),
            DomainError::Conflict { .. } | DomainError::Internal { .. } => {
                ErrorResponse::new(self.error_code(), "Internal server error")
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
