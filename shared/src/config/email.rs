//! Outbound email configuration module

use serde::{Deserialize, Serialize};

use super::env_parse;

/// Email delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Log messages instead of delivering them
    Mock,
    /// Deliver through an HTTP mail API
    Http,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" | "console" => Ok(EmailProvider::Mock),
            "http" | "api" => Ok(EmailProvider::Http),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// Email service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Delivery provider
    pub provider: EmailProvider,

    /// Mail API endpoint (HTTP provider only)
    #[serde(default)]
    pub api_url: String,

    /// Mail API bearer key (HTTP provider only)
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Sender address
    pub from_address: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            api_url: String::new(),
            api_key: String::new(),
            from_address: String::from("no-reply@tripkit.local"),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.provider),
            api_url: std::env::var("EMAIL_API_URL").unwrap_or_default(),
            api_key: std::env::var("EMAIL_API_KEY").unwrap_or_default(),
            from_address: std::env::var("EMAIL_FROM").unwrap_or(defaults.from_address),
            timeout_secs: env_parse("EMAIL_TIMEOUT_SECS").unwrap_or(defaults.timeout_secs),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}
