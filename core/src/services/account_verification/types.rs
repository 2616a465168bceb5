//! Types for account verification results

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of requesting a verification code
#[derive(Debug, Clone)]
pub struct RequestCodeResult {
    /// The ticket that was issued
    pub ticket_id: Uuid,
    /// The message ID from the delivery provider
    pub message_id: String,
    /// When the ticket was issued
    pub issued_at: DateTime<Utc>,
    /// When the user can request another code
    pub next_request_at: DateTime<Utc>,
}
