//! In-memory implementation of TicketRepository for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::domain::entities::ticket::Ticket;
use crate::errors::DomainError;

use super::r#trait::{TicketRepository, TicketTransaction};

/// Mock ticket repository for testing
///
/// Transactions hold the table lock for their whole lifetime, which gives
/// the same per-user serialization the database achieves with row locks.
#[derive(Clone, Default)]
pub struct MockTicketRepository {
    tickets: Arc<Mutex<Vec<Ticket>>>,
    forced_conflicts: Arc<AtomicU32>,
}

impl MockTicketRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a ticket directly, bypassing issuance rules
    pub async fn seed(&self, ticket: Ticket) {
        self.tickets.lock().await.push(ticket);
    }

    /// Every stored ticket in insertion order
    pub async fn snapshot(&self) -> Vec<Ticket> {
        self.tickets.lock().await.clone()
    }

    /// Make the next `count` inserts fail with a conflict
    pub fn force_create_conflicts(&self, count: u32) {
        self.forced_conflicts.store(count, Ordering::SeqCst);
    }
}

fn newest_first<'a>(tickets: impl Iterator<Item = &'a Ticket>, user_id: Uuid) -> Vec<Ticket> {
    let mut owned: Vec<Ticket> = tickets.filter(|t| t.user_id == user_id).cloned().collect();
    // Later inserts win ties on created_at
    owned.reverse();
    owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    owned
}

fn take_forced_conflict(counter: &AtomicU32) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

fn insert_unique(tickets: &mut Vec<Ticket>, ticket: Ticket) -> Result<Ticket, DomainError> {
    if tickets.iter().any(|t| t.unique_code == ticket.unique_code) {
        return Err(DomainError::Conflict {
            message: "Ticket code already exists".to_string(),
        });
    }
    tickets.push(ticket.clone());
    Ok(ticket)
}

#[async_trait]
impl TicketRepository for MockTicketRepository {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Ticket>, DomainError> {
        let tickets = self.tickets.lock().await;
        Ok(newest_first(tickets.iter(), user_id))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Ticket>, DomainError> {
        let tickets = self.tickets.lock().await;
        Ok(tickets.iter().find(|t| t.unique_code == code).cloned())
    }

    async fn create(&self, ticket: Ticket) -> Result<Ticket, DomainError> {
        if take_forced_conflict(&self.forced_conflicts) {
            return Err(DomainError::Conflict {
                message: "Ticket code already exists".to_string(),
            });
        }
        let mut tickets = self.tickets.lock().await;
        insert_unique(&mut tickets, ticket)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tickets = self.tickets.lock().await;
        let before = tickets.len();
        tickets.retain(|t| t.id != id);
        Ok(tickets.len() < before)
    }

    async fn delete_all_by_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tickets = self.tickets.lock().await;
        let before = tickets.len();
        tickets.retain(|t| t.user_id != user_id);
        Ok(before - tickets.len())
    }

    async fn begin(&self) -> Result<Box<dyn TicketTransaction>, DomainError> {
        let guard = self.tickets.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MockTicketTransaction {
            guard,
            working,
            forced_conflicts: self.forced_conflicts.clone(),
        }))
    }
}

/// Transaction over the mock table; writes go to a working copy
pub struct MockTicketTransaction {
    guard: OwnedMutexGuard<Vec<Ticket>>,
    working: Vec<Ticket>,
    forced_conflicts: Arc<AtomicU32>,
}

#[async_trait]
impl TicketTransaction for MockTicketTransaction {
    async fn lock_user(&mut self, _user_id: Uuid) -> Result<(), DomainError> {
        // The table guard is already held
        Ok(())
    }

    async fn list_by_user(&mut self, user_id: Uuid) -> Result<Vec<Ticket>, DomainError> {
        Ok(newest_first(self.working.iter(), user_id))
    }

    async fn code_exists(&mut self, code: &str) -> Result<bool, DomainError> {
        Ok(self.working.iter().any(|t| t.unique_code == code))
    }

    async fn create(&mut self, ticket: Ticket) -> Result<Ticket, DomainError> {
        if take_forced_conflict(&self.forced_conflicts) {
            return Err(DomainError::Conflict {
                message: "Ticket code already exists".to_string(),
            });
        }
        insert_unique(&mut self.working, ticket)
    }

    async fn delete_by_id(&mut self, id: Uuid) -> Result<bool, DomainError> {
        let before = self.working.len();
        self.working.retain(|t| t.id != id);
        Ok(self.working.len() < before)
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let MockTicketTransaction {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }
}
