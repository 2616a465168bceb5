//! Account verification service implementation

use std::sync::Arc;
use tk_shared::email::{is_valid_email, mask_email, normalize_email};
use tk_shared::validation::{is_valid_ticket_code, normalize_ticket_code};
use uuid::Uuid;

use crate::domain::value_objects::VerificationPurpose;
use crate::errors::{DomainError, DomainResult, TicketError};
use crate::repositories::TicketRepository;
use crate::services::ticket::TicketService;

use super::traits::NotificationServiceTrait;
use super::types::RequestCodeResult;

/// Issues verification codes by email and redeems them
pub struct AccountVerificationService<R: TicketRepository, N: NotificationServiceTrait> {
    /// Ticket issuance and redemption
    tickets: Arc<TicketService<R>>,
    /// Delivery channel for codes
    notifier: Arc<N>,
}

impl<R: TicketRepository, N: NotificationServiceTrait> AccountVerificationService<R, N> {
    /// Create a new account verification service
    ///
    /// # Arguments
    ///
    /// * `tickets` - Ticket service backing the codes
    /// * `notifier` - Delivery implementation
    pub fn new(tickets: Arc<TicketService<R>>, notifier: Arc<N>) -> Self {
        Self { tickets, notifier }
    }

    /// Issue a code for `user_id` and send it to `email`
    ///
    /// This method:
    /// 1. Validates the email address format
    /// 2. Issues a ticket (rate limiting and rotation apply)
    /// 3. Sends the ticket's code to the address
    ///
    /// A ticket whose delivery failed is left in place. It cannot be
    /// redeemed by anyone who never saw it, and it still counts towards the
    /// request delay.
    ///
    /// # Returns
    ///
    /// * `Ok(RequestCodeResult)` - Ticket and delivery details
    /// * `Err(DomainError::Validation)` - The email address is malformed
    /// * `Err(DomainError::Ticket(_))` - Issuance was refused
    /// * `Err(DomainError::Notification)` - The code could not be delivered
    pub async fn request_code(
        &self,
        user_id: Uuid,
        email: &str,
        purpose: VerificationPurpose,
    ) -> DomainResult<RequestCodeResult> {
        if !is_valid_email(email) {
            return Err(DomainError::Validation {
                message: "Invalid email address format".to_string(),
            });
        }
        let recipient = normalize_email(email);

        let ticket = self.tickets.generate(user_id).await?;

        let message_id = self
            .notifier
            .send_verification_code(&recipient, &ticket.unique_code, purpose)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %user_id,
                    email = %mask_email(&recipient),
                    purpose = %purpose,
                    error = %e,
                    event = "verification_email_failed",
                    "Failed to deliver verification code"
                );
                DomainError::Notification { message: e }
            })?;

        tracing::info!(
            user_id = %user_id,
            email = %mask_email(&recipient),
            purpose = %purpose,
            ticket_id = %ticket.id,
            message_id = %message_id,
            event = "verification_email_sent",
            "Verification code sent"
        );

        Ok(RequestCodeResult {
            ticket_id: ticket.id,
            message_id,
            issued_at: ticket.created_at,
            next_request_at: ticket.rate_limited_until(self.tickets.config().request_delay),
        })
    }

    /// Redeem a code typed in by the user
    ///
    /// Input is trimmed and upper-cased first. Anything that cannot be a
    /// ticket code is answered like an unknown code without a store lookup.
    pub async fn confirm_code(&self, user_id: Uuid, code: &str) -> DomainResult<()> {
        let code = normalize_ticket_code(code);
        if !is_valid_ticket_code(&code) {
            tracing::debug!(user_id = %user_id, event = "ticket_code_malformed", "Rejected malformed code");
            return Err(TicketError::NotFound.into());
        }

        self.tickets.verify(&code, user_id).await
    }
}
