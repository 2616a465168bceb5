//! Bridges email delivery to the core notification port

use async_trait::async_trait;
use tk_core::domain::value_objects::VerificationPurpose;
use tk_core::services::NotificationServiceTrait;

use super::email_service::EmailService;

/// Adapter that implements the core NotificationServiceTrait over any
/// email service
pub struct EmailNotifier {
    inner: Box<dyn EmailService>,
}

impl EmailNotifier {
    /// Wrap an email service
    pub fn new(inner: Box<dyn EmailService>) -> Self {
        Self { inner }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl NotificationServiceTrait for EmailNotifier {
    async fn send_verification_code(
        &self,
        recipient: &str,
        code: &str,
        purpose: VerificationPurpose,
    ) -> Result<String, String> {
        self.inner
            .send_verification_code(recipient, code, purpose)
            .await
            .map_err(|e| e.to_string())
    }
}
