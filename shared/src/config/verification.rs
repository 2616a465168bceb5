//! Verification ticket configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::env_parse;

/// Maximum number of outstanding tickets a single user may hold
pub const MAX_OUTSTANDING_TICKETS: usize = 5;

/// Length of a ticket's unique code
pub const CODE_LENGTH: usize = 8;

/// Symbols a ticket code is drawn from
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Verification ticket issuance rules
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minimum delay between two ticket requests for the same user, in milliseconds
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Optional lifetime of a ticket in seconds. `None` keeps tickets
    /// redeemable until they are consumed or evicted.
    #[serde(default)]
    pub ticket_ttl_seconds: Option<u64>,

    /// Upper bound on code generation attempts when searching for an unused code
    #[serde(default = "default_max_code_attempts")]
    pub max_code_attempts: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: default_request_delay_ms(),
            ticket_ttl_seconds: None,
            max_code_attempts: default_max_code_attempts(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    ///
    /// Reads `REQUEST_DELAY_MS`, `TICKET_TTL_SECONDS` and
    /// `TICKET_CODE_MAX_ATTEMPTS`.
    pub fn from_env() -> Self {
        Self {
            request_delay_ms: env_parse("REQUEST_DELAY_MS").unwrap_or_else(default_request_delay_ms),
            ticket_ttl_seconds: env_parse::<u64>("TICKET_TTL_SECONDS").filter(|ttl| *ttl > 0),
            max_code_attempts: env_parse::<u32>("TICKET_CODE_MAX_ATTEMPTS")
                .filter(|attempts| *attempts > 0)
                .unwrap_or_else(default_max_code_attempts),
        }
    }

    /// Set the request delay, saturating at `u64::MAX` milliseconds
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the ticket lifetime
    pub fn with_ticket_ttl(mut self, ttl: Duration) -> Self {
        self.ticket_ttl_seconds = Some(ttl.as_secs());
        self
    }

    /// Request delay as a `Duration`
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Ticket lifetime as a `Duration`, if configured
    pub fn ticket_ttl(&self) -> Option<Duration> {
        self.ticket_ttl_seconds.map(Duration::from_secs)
    }
}

fn default_request_delay_ms() -> u64 {
    300_000 // 5 minutes
}

fn default_max_code_attempts() -> u32 {
    10
}
