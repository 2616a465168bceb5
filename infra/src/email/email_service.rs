//! Email Service Interface

use async_trait::async_trait;
use serde::Serialize;
use tk_core::domain::value_objects::VerificationPurpose;

use crate::InfrastructureError;

/// A rendered outbound email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

/// Email service trait for sending messages
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send an email
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Send a verification code using the standard template for `purpose`
    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        purpose: VerificationPurpose,
    ) -> Result<String, InfrastructureError> {
        self.send_email(&verification_message(to, code, purpose)).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    async fn is_available(&self) -> bool {
        true
    }
}

/// Render the verification email for `purpose`
pub fn verification_message(to: &str, code: &str, purpose: VerificationPurpose) -> EmailMessage {
    let action = match purpose {
        VerificationPurpose::Registration => "finish creating your TripKit account",
        VerificationPurpose::Login => "sign in to TripKit",
        VerificationPurpose::PasswordReset => "reset your TripKit password",
    };

    EmailMessage {
        to: to.to_string(),
        subject: purpose.subject().to_string(),
        body: format!(
            "Your verification code is: {}\n\nEnter it to {}. If you did not request this code, you can ignore this email.",
            code, action
        ),
    }
}
