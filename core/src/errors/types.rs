//! Verification ticket error types

use thiserror::Error;

/// Errors raised while issuing or redeeming verification tickets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    #[error("Too many requests. Please wait {seconds_remaining} seconds before requesting a new code")]
    RateLimited { seconds_remaining: u64 },

    #[error("Verification code not found")]
    NotFound,

    #[error("Verification code does not belong to this account")]
    Unauthorized,

    #[error("Verification code expired")]
    Expired,

    #[error("Unable to allocate a unique verification code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },
}

impl TicketError {
    /// Whether the error means "this code cannot be redeemed by you"
    ///
    /// Callers must not reveal whether a code exists for another account, so
    /// `NotFound` and `Unauthorized` are reported identically.
    pub fn is_invalid_code(&self) -> bool {
        matches!(self, TicketError::NotFound | TicketError::Unauthorized)
    }

    /// Message safe to show to the requesting user
    pub fn public_message(&self) -> String {
        match self {
            TicketError::NotFound | TicketError::Unauthorized => {
                "Invalid verification code".to_string()
            }
            TicketError::CodeSpaceExhausted { .. } => {
                "Unable to issue a verification code. Please try again later".to_string()
            }
            other => other.to_string(),
        }
    }
}
