//! Trait for code delivery integration

use async_trait::async_trait;

use crate::domain::value_objects::VerificationPurpose;

/// Trait for delivering verification codes to users
#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    /// Deliver a verification code, returning the provider's message id
    async fn send_verification_code(
        &self,
        recipient: &str,
        code: &str,
        purpose: VerificationPurpose,
    ) -> Result<String, String>;
}
