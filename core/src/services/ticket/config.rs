//! Configuration for the ticket service

use chrono::Duration;
use tk_shared::config::VerificationConfig;

use crate::domain::entities::ticket::MAX_OUTSTANDING_TICKETS;

/// Configuration for the ticket service
#[derive(Debug, Clone)]
pub struct TicketServiceConfig {
    /// Minimum time between two issuances for the same user
    pub request_delay: Duration,
    /// Lifetime of a ticket; `None` keeps tickets valid until consumed or evicted
    pub ticket_ttl: Option<Duration>,
    /// Outstanding tickets a user may hold
    pub max_outstanding: usize,
    /// Code generation attempts before giving up
    pub max_code_attempts: u32,
}

impl Default for TicketServiceConfig {
    fn default() -> Self {
        Self::from(&VerificationConfig::default())
    }
}

const MAX_WINDOW_DAYS: i64 = 365 * 100;

/// Ceiling applied to configured delays and lifetimes
pub fn max_window() -> Duration {
    Duration::days(MAX_WINDOW_DAYS)
}

impl From<&VerificationConfig> for TicketServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        let cap = max_window();
        let request_delay = i64::try_from(config.request_delay_ms)
            .ok()
            .filter(|ms| *ms < cap.num_milliseconds())
            .map_or(cap, Duration::milliseconds);

        Self {
            request_delay,
            ticket_ttl: config
                .ticket_ttl()
                .map(|ttl| Duration::from_std(ttl).map_or(cap, |ttl| ttl.min(cap))),
            max_outstanding: MAX_OUTSTANDING_TICKETS,
            max_code_attempts: config.max_code_attempts.max(1),
        }
    }
}
