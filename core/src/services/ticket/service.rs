//! Main ticket service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::entities::ticket::Ticket;
use crate::errors::{DomainError, DomainResult, TicketError};
use crate::repositories::TicketRepository;
use crate::services::clock::{Clock, SystemClock};

use super::code_generator::{CodeGenerator, RandomCodeGenerator};
use super::config::TicketServiceConfig;

/// Ticket service for issuing and redeeming verification tickets
pub struct TicketService<R: TicketRepository> {
    /// Ticket persistence
    repository: Arc<R>,
    /// Service configuration
    config: TicketServiceConfig,
    /// Time source for rate limiting and expiry
    clock: Arc<dyn Clock>,
    /// Source of candidate codes
    code_generator: Arc<dyn CodeGenerator>,
}

impl<R: TicketRepository> TicketService<R> {
    /// Create a new ticket service using the wall clock and random codes
    pub fn new(repository: Arc<R>, config: TicketServiceConfig) -> Self {
        Self {
            repository,
            config,
            clock: Arc::new(SystemClock),
            code_generator: Arc::new(RandomCodeGenerator),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the code source
    pub fn with_code_generator(mut self, code_generator: Arc<dyn CodeGenerator>) -> Self {
        self.code_generator = code_generator;
        self
    }

    /// Service configuration
    pub fn config(&self) -> &TicketServiceConfig {
        &self.config
    }

    /// Issue a new ticket for a user
    ///
    /// This method, inside one repository transaction:
    /// 1. Locks the user and lists their tickets, newest first
    /// 2. Rejects the request if the newest ticket is younger than the request delay
    /// 3. Evicts the oldest tickets so the new one fits in the outstanding window
    /// 4. Draws codes until one is unused, up to `max_code_attempts`
    /// 5. Inserts the ticket and commits
    ///
    /// # Returns
    ///
    /// * `Ok(Ticket)` - The persisted ticket
    /// * `Err(DomainError::Ticket(TicketError::RateLimited))` - Too soon after the previous ticket
    /// * `Err(DomainError::Ticket(TicketError::CodeSpaceExhausted))` - No unique code found
    pub async fn generate(&self, user_id: Uuid) -> DomainResult<Ticket> {
        let mut tx = self.repository.begin().await?;
        tx.lock_user(user_id).await?;

        let tickets = tx.list_by_user(user_id).await?;
        let now = self.clock.now();

        if let Some(latest) = tickets.first() {
            let open_at = latest.rate_limited_until(self.config.request_delay);
            if open_at > now {
                let seconds_remaining = (open_at - now).num_seconds().max(0) as u64;
                warn!(
                    user_id = %user_id,
                    seconds_remaining = seconds_remaining,
                    event = "ticket_rate_limited",
                    "Verification ticket requested before the delay window elapsed"
                );
                return Err(TicketError::RateLimited { seconds_remaining }.into());
            }
        }

        // Make room for the new ticket; oldest are last in the list
        let keep = self.config.max_outstanding.saturating_sub(1);
        for evicted in tickets.iter().skip(keep) {
            tx.delete_by_id(evicted.id).await?;
            info!(
                user_id = %user_id,
                ticket_id = %evicted.id,
                event = "ticket_evicted",
                "Evicted oldest verification ticket"
            );
        }

        let attempts = self.config.max_code_attempts;
        for attempt in 1..=attempts {
            let code = self.code_generator.generate();
            if tx.code_exists(&code).await? {
                debug!(attempt = attempt, event = "ticket_code_collision", "Generated code already in use");
                continue;
            }

            match tx.create(Ticket::new(user_id, code, now)).await {
                Ok(ticket) => {
                    tx.commit().await?;
                    info!(
                        user_id = %user_id,
                        ticket_id = %ticket.id,
                        attempt = attempt,
                        event = "ticket_issued",
                        "Issued verification ticket"
                    );
                    return Ok(ticket);
                }
                Err(DomainError::Conflict { .. }) => {
                    debug!(attempt = attempt, event = "ticket_code_collision", "Insert raced on code");
                }
                Err(e) => return Err(e),
            }
        }

        error!(
            user_id = %user_id,
            attempts = attempts,
            event = "ticket_code_space_exhausted",
            "Failed to allocate a unique verification code"
        );
        Err(TicketError::CodeSpaceExhausted { attempts }.into())
    }

    /// Redeem a ticket
    ///
    /// On success every ticket held by `user_id` is deleted, closing any
    /// other verification still in flight for that account.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The code was valid and all of the user's tickets are gone
    /// * `Err(DomainError::Ticket(TicketError::NotFound))` - No ticket holds this code
    /// * `Err(DomainError::Ticket(TicketError::Unauthorized))` - The code belongs to another user
    /// * `Err(DomainError::Ticket(TicketError::Expired))` - The ticket outlived the configured TTL
    pub async fn verify(&self, code: &str, user_id: Uuid) -> DomainResult<()> {
        let ticket = match self.repository.find_by_code(code).await? {
            Some(ticket) => ticket,
            None => {
                warn!(user_id = %user_id, event = "ticket_not_found", "Verification code not found");
                return Err(TicketError::NotFound.into());
            }
        };

        if !ticket.is_owned_by(user_id) {
            warn!(
                user_id = %user_id,
                ticket_id = %ticket.id,
                event = "ticket_owner_mismatch",
                "Verification code presented by a different user"
            );
            return Err(TicketError::Unauthorized.into());
        }

        if let Some(ttl) = self.config.ticket_ttl {
            if ticket.is_expired(ttl, self.clock.now()) {
                warn!(
                    user_id = %user_id,
                    ticket_id = %ticket.id,
                    event = "ticket_expired",
                    "Verification code presented after expiry"
                );
                return Err(TicketError::Expired.into());
            }
        }

        let removed = self.repository.delete_all_by_user(user_id).await?;
        info!(
            user_id = %user_id,
            ticket_id = %ticket.id,
            invalidated = removed,
            event = "ticket_verified",
            "Verification code accepted"
        );
        Ok(())
    }

    /// List a user's outstanding tickets, newest first
    pub async fn outstanding_tickets(&self, user_id: Uuid) -> DomainResult<Vec<Ticket>> {
        self.repository.list_by_user(user_id).await
    }

    /// Earliest instant the user may request another ticket
    ///
    /// Returns `None` when a request would be accepted now.
    pub async fn next_request_at(&self, user_id: Uuid) -> DomainResult<Option<DateTime<Utc>>> {
        let tickets = self.repository.list_by_user(user_id).await?;
        let now = self.clock.now();
        Ok(tickets
            .first()
            .map(|latest| latest.rate_limited_until(self.config.request_delay))
            .filter(|at| *at > now))
    }
}
