//! Ticket repository traits defining the interface for verification ticket persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::ticket::Ticket;
use crate::errors::DomainError;

/// Repository trait for Ticket entity persistence operations
///
/// Implementations own the ticket table exclusively. `unique_code` must be
/// unique across all rows; an insert that violates that constraint must fail
/// with `DomainError::Conflict` so the caller can draw a new code.
///
/// Operations on the repository itself run outside any transaction. Issuance
/// goes through [`TicketRepository::begin`] so that the rate-limit check,
/// eviction and insert commit or roll back together.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// List every ticket held by a user, newest first
    ///
    /// # Arguments
    /// * `user_id` - The owning user's UUID
    ///
    /// # Returns
    /// * `Ok(Vec<Ticket>)` - Tickets ordered by `created_at` descending
    /// * `Err(DomainError)` - Database error occurred
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Ticket>, DomainError>;

    /// Find a ticket by its code
    ///
    /// # Returns
    /// * `Ok(Some(Ticket))` - Ticket found
    /// * `Ok(None)` - No ticket holds this code
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_code(&self, code: &str) -> Result<Option<Ticket>, DomainError>;

    /// Persist a new ticket
    ///
    /// # Returns
    /// * `Ok(Ticket)` - The stored ticket
    /// * `Err(DomainError::Conflict)` - The code is already taken
    /// * `Err(DomainError)` - Database error occurred
    async fn create(&self, ticket: Ticket) -> Result<Ticket, DomainError>;

    /// Delete a single ticket
    ///
    /// # Returns
    /// * `Ok(true)` - Ticket was deleted
    /// * `Ok(false)` - No ticket with this id
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete every ticket held by a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tickets deleted
    async fn delete_all_by_user(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Open a transaction for an atomic read-check-write sequence
    async fn begin(&self) -> Result<Box<dyn TicketTransaction>, DomainError>;

    /// Check whether any ticket holds `code`
    async fn code_exists(&self, code: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_code(code).await?.is_some())
    }

    /// Count outstanding tickets for a user
    async fn count_by_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        Ok(self.list_by_user(user_id).await?.len())
    }
}

/// A unit of work over the ticket table
///
/// Dropping a transaction without calling [`TicketTransaction::commit`]
/// discards every write made through it.
#[async_trait]
pub trait TicketTransaction: Send {
    /// Serialize concurrent transactions for the same user
    ///
    /// Must be called before reading the user's tickets; a second
    /// transaction locking the same user waits until the first one ends.
    async fn lock_user(&mut self, user_id: Uuid) -> Result<(), DomainError>;

    /// List the user's tickets, newest first, as seen by this transaction
    async fn list_by_user(&mut self, user_id: Uuid) -> Result<Vec<Ticket>, DomainError>;

    /// Check whether any ticket holds `code`, as seen by this transaction
    async fn code_exists(&mut self, code: &str) -> Result<bool, DomainError>;

    /// Insert a ticket; fails with `DomainError::Conflict` on a duplicate code
    async fn create(&mut self, ticket: Ticket) -> Result<Ticket, DomainError>;

    /// Delete a single ticket
    async fn delete_by_id(&mut self, id: Uuid) -> Result<bool, DomainError>;

    /// Make every write of this transaction visible
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}
