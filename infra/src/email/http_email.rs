//! HTTP Mail API Email Service
//!
//! Posts messages as JSON to a transactional mail API authenticated with a
//! bearer key. The API is expected to answer with a JSON body carrying the
//! message id as `id` or `message_id`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tk_shared::email::mask_email;
use tracing::{debug, error, info, warn};

use super::email_service::{EmailMessage, EmailService};
use crate::config::EmailConfig;
use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    message_id: Option<String>,
}

/// HTTP mail API email service
pub struct HttpEmailService {
    client: reqwest::Client,
    config: EmailConfig,
}

impl HttpEmailService {
    /// Create a new HTTP email service
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_url.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_API_URL is required for the http email provider".to_string(),
            ));
        }
        if !config.api_url.starts_with("http://") && !config.api_url.starts_with("https://") {
            return Err(InfrastructureError::Config(format!(
                "EMAIL_API_URL must be an http(s) URL: {}",
                config.api_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!(
            endpoint = %config.api_url,
            from = %mask_email(&config.from_address),
            "HTTP email service initialized"
        );

        Ok(Self { client, config })
    }

    fn request_body<'a>(&'a self, message: &'a EmailMessage) -> SendRequest<'a> {
        SendRequest {
            from: &self.config.from_address,
            to: &message.to,
            subject: &message.subject,
            text: &message.body,
        }
    }
}

/// Message id reported by the mail API, or a locally generated one when the
/// accepted response carries none
fn message_id_from(body: &[u8], masked: &str) -> String {
    let parsed = if body.is_empty() {
        SendResponse::default()
    } else {
        serde_json::from_slice::<SendResponse>(body).unwrap_or_else(|e| {
            warn!(email = %masked, error = %e, "Mail API accepted the message with an unreadable body");
            SendResponse::default()
        })
    };

    parsed
        .id
        .or(parsed.message_id)
        .unwrap_or_else(|| format!("http_{}", uuid::Uuid::new_v4()))
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let masked = mask_email(&message.to);
        debug!(email = %masked, "Sending email through mail API");

        let mut request = self
            .client
            .post(&self.config.api_url)
            .json(&self.request_body(message));
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request.send().await.map_err(|e| {
            error!(email = %masked, error = %e, "Mail API request failed");
            InfrastructureError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(email = %masked, status = %status, "Mail API rejected message");
            return Err(InfrastructureError::Email(format!(
                "Mail API returned {}",
                status
            )));
        }

        let message_id = match response.bytes().await {
            Ok(body) => message_id_from(&body, &masked),
            Err(e) => {
                warn!(email = %masked, error = %e, "Mail API response body could not be read");
                message_id_from(&[], &masked)
            }
        };

        info!(
            target: "email_service",
            provider = "http",
            email = %masked,
            message_id = %message_id,
            "Email sent successfully"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "HTTP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> EmailConfig {
        EmailConfig {
            provider: crate::config::EmailProvider::Http,
            api_url: url.to_string(),
            api_key: "secret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_request_body_uses_configured_sender() {
        let service = HttpEmailService::new(config("https://mail.example.com/v1/send")).unwrap();
        let message = EmailMessage {
            to: "traveller@example.com".to_string(),
            subject: "Hello".to_string(),
            body: "Body".to_string(),
        };

        let json = serde_json::to_value(service.request_body(&message)).unwrap();
        assert_eq!(json["from"], "no-reply@tripkit.local");
        assert_eq!(json["to"], "traveller@example.com");
        assert_eq!(json["text"], "Body");
    }

    #[test]
    fn test_response_id_fields() {
        let body: SendResponse = serde_json::from_str(r#"{"message_id":"abc"}"#).unwrap();
        assert_eq!(body.id, None);
        assert_eq!(body.message_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_message_id_prefers_api_id() {
        assert_eq!(message_id_from(br#"{"id":"m-1","message_id":"m-2"}"#, "t***@example.com"), "m-1");
        assert_eq!(message_id_from(br#"{"message_id":"m-2"}"#, "t***@example.com"), "m-2");
    }

    #[test]
    fn test_unreadable_body_falls_back_to_local_id() {
        for body in [&b"<html>ok</html>"[..], &b""[..], &b"{}"[..]] {
            let id = message_id_from(body, "t***@example.com");
            assert!(id.starts_with("http_"), "unexpected id {}", id);
        }
    }
}
