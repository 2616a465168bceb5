//! Verification ticket entity for one-time account codes.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use tk_shared::config::verification::{CODE_ALPHABET, CODE_LENGTH, MAX_OUTSTANDING_TICKETS};

/// A one-time verification code issued to a user
///
/// Tickets carry no state flags: a ticket is active while its row exists and
/// is gone once it has been consumed (all of the owner's tickets are deleted
/// on a successful verification) or evicted by rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier for the ticket
    pub id: Uuid,

    /// The 8-character code, unique across all tickets
    pub unique_code: String,

    /// Owning user
    pub user_id: Uuid,

    /// Timestamp when the ticket was issued
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// Creates a new ticket for `user_id` with the given code, issued at `created_at`
    pub fn new(user_id: Uuid, unique_code: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            unique_code,
            user_id,
            created_at,
        }
    }

    /// Draws a random code of `CODE_LENGTH` symbols from `CODE_ALPHABET`
    ///
    /// Each symbol is sampled uniformly from the operating system CSPRNG.
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }

    /// Whether this ticket belongs to `user_id`
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Time elapsed since issuance
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    /// Instant at which the ticket stops being redeemable under `ttl`
    ///
    /// Saturates at the latest representable instant.
    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        saturating_offset(self.created_at, ttl)
    }

    /// Instant after which its owner may be issued another ticket, given
    /// the minimum `delay` between issuances
    ///
    /// Saturates at the latest representable instant.
    pub fn rate_limited_until(&self, delay: Duration) -> DateTime<Utc> {
        saturating_offset(self.created_at, delay)
    }

    /// Whether the ticket has outlived `ttl` at `now`
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.expires_at(ttl) <= now
    }
}

fn saturating_offset(at: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    at.checked_add_signed(by).unwrap_or(if by < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample_ticket(created_at: DateTime<Utc>) -> Ticket {
        Ticket::new(Uuid::new_v4(), "AB12CD34".to_string(), created_at)
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..200 {
            let code = Ticket::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generate_code_varies() {
        let codes: HashSet<String> = (0..100).map(|_| Ticket::generate_code()).collect();
        assert!(codes.len() > 90);
    }

    #[test]
    fn test_generate_code_uses_whole_alphabet() {
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.extend(Ticket::generate_code().chars());
        }
        assert_eq!(seen.len(), CODE_ALPHABET.len());
    }

    #[test]
    fn test_new_ticket() {
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let ticket = Ticket::new(user_id, "ZZ99YY88".to_string(), now);

        assert_eq!(ticket.user_id, user_id);
        assert_eq!(ticket.unique_code, "ZZ99YY88");
        assert_eq!(ticket.created_at, now);
        assert!(ticket.is_owned_by(user_id));
        assert!(!ticket.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_age() {
        let now = Utc::now();
        let ticket = sample_ticket(now - Duration::seconds(90));
        assert_eq!(ticket.age(now), Duration::seconds(90));
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let ttl = Duration::minutes(15);
        let ticket = sample_ticket(now);

        assert_eq!(ticket.expires_at(ttl), now + ttl);
        assert!(!ticket.is_expired(ttl, now + ttl - Duration::milliseconds(1)));
        assert!(ticket.is_expired(ttl, now + ttl));
    }

    #[test]
    fn test_huge_windows_saturate() {
        let now = Utc::now();
        let ticket = sample_ticket(now);
        let huge = Duration::milliseconds(i64::MAX);

        assert_eq!(ticket.expires_at(huge), DateTime::<Utc>::MAX_UTC);
        assert!(!ticket.is_expired(huge, now + Duration::days(365 * 1000)));
        assert_eq!(ticket.rate_limited_until(huge), DateTime::<Utc>::MAX_UTC);
        assert_eq!(
            ticket.rate_limited_until(Duration::minutes(5)),
            now + Duration::minutes(5)
        );
    }

    #[test]
    fn test_serialization() {
        let ticket = sample_ticket(Utc::now());
        let json = serde_json::to_string(&ticket).unwrap();
        let deserialized: Ticket = serde_json::from_str(&json).unwrap();
        assert_eq!(ticket, deserialized);
    }
}
