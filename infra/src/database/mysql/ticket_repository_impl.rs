//! MySQL implementation of the TicketRepository trait.
//!
//! Tickets live in the `verification_tickets` table:
//!
//! ```sql
//! CREATE TABLE verification_tickets (
//!     id          CHAR(36)    NOT NULL PRIMARY KEY,
//!     unique_code CHAR(8)     NOT NULL,
//!     user_id     CHAR(36)    NOT NULL,
//!     created_at  DATETIME(6) NOT NULL,
//!     UNIQUE KEY uk_verification_tickets_code (unique_code),
//!     KEY idx_verification_tickets_user (user_id, created_at)
//! );
//! ```
//!
//! Issuance transactions lock the owner's row in `users` so that two
//! concurrent requests for the same account run one after the other.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, Row, Transaction};
use uuid::Uuid;

use tk_core::domain::entities::ticket::Ticket;
use tk_core::errors::DomainError;
use tk_core::repositories::{TicketRepository, TicketTransaction};

const SELECT_BY_USER: &str = r#"
    SELECT id, unique_code, user_id, created_at
    FROM verification_tickets
    WHERE user_id = ?
    ORDER BY created_at DESC, id DESC
"#;

const SELECT_BY_CODE: &str = r#"
    SELECT id, unique_code, user_id, created_at
    FROM verification_tickets
    WHERE unique_code = ?
    LIMIT 1
"#;

const CODE_EXISTS: &str =
    "SELECT EXISTS(SELECT 1 FROM verification_tickets WHERE unique_code = ?) AS code_exists";

const INSERT_TICKET: &str = r#"
    INSERT INTO verification_tickets (id, unique_code, user_id, created_at)
    VALUES (?, ?, ?, ?)
"#;

const DELETE_BY_ID: &str = "DELETE FROM verification_tickets WHERE id = ?";

const DELETE_BY_USER: &str = "DELETE FROM verification_tickets WHERE user_id = ?";

const LOCK_USER: &str = "SELECT id FROM users WHERE id = ? FOR UPDATE";

/// MySQL implementation of TicketRepository
pub struct MySqlTicketRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTicketRepository {
    /// Create a new MySQL ticket repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Convert database row to Ticket entity
fn row_to_ticket(row: &sqlx::mysql::MySqlRow) -> Result<Ticket, DomainError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| internal("Failed to get id", e))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| internal("Failed to get user_id", e))?;

    Ok(Ticket {
        id: Uuid::parse_str(&id).map_err(|e| internal("Invalid ticket UUID", e))?,
        unique_code: row
            .try_get("unique_code")
            .map_err(|e| internal("Failed to get unique_code", e))?,
        user_id: Uuid::parse_str(&user_id).map_err(|e| internal("Invalid user UUID", e))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| internal("Failed to get created_at", e))?,
    })
}

fn rows_to_tickets(rows: &[sqlx::mysql::MySqlRow]) -> Result<Vec<Ticket>, DomainError> {
    rows.iter().map(row_to_ticket).collect()
}

fn internal(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// Map an insert failure, turning a duplicate code into a retryable conflict
fn insert_error(e: sqlx::Error) -> DomainError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DomainError::Conflict {
            message: "Ticket code already exists".to_string(),
        },
        _ => internal("Failed to save ticket", e),
    }
}

#[async_trait]
impl TicketRepository for MySqlTicketRepository {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Ticket>, DomainError> {
        let rows = sqlx::query(SELECT_BY_USER)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| internal("Failed to list user tickets", e))?;

        rows_to_tickets(&rows)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Ticket>, DomainError> {
        let row = sqlx::query(SELECT_BY_CODE)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find ticket by code", e))?;

        row.as_ref().map(row_to_ticket).transpose()
    }

    async fn create(&self, ticket: Ticket) -> Result<Ticket, DomainError> {
        sqlx::query(INSERT_TICKET)
            .bind(ticket.id.to_string())
            .bind(&ticket.unique_code)
            .bind(ticket.user_id.to_string())
            .bind(ticket.created_at)
            .execute(&self.pool)
            .await
            .map_err(insert_error)?;

        Ok(ticket)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to delete ticket", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_by_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let result = sqlx::query(DELETE_BY_USER)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to delete user tickets", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn begin(&self) -> Result<Box<dyn TicketTransaction>, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| internal("Failed to begin transaction", e))?;

        Ok(Box::new(MySqlTicketTransaction { tx }))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, DomainError> {
        let row = sqlx::query(CODE_EXISTS)
            .bind(code)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to check code existence", e))?;

        let exists: i64 = row
            .try_get("code_exists")
            .map_err(|e| internal("Failed to get existence result", e))?;
        Ok(exists == 1)
    }
}

/// Issuance transaction on a pooled MySQL connection
///
/// Dropping it without committing rolls the transaction back.
pub struct MySqlTicketTransaction {
    tx: Transaction<'static, MySql>,
}

#[async_trait]
impl TicketTransaction for MySqlTicketTransaction {
    async fn lock_user(&mut self, user_id: Uuid) -> Result<(), DomainError> {
        let locked = sqlx::query(LOCK_USER)
            .bind(user_id.to_string())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| internal("Failed to lock user", e))?;

        if locked.is_none() {
            return Err(DomainError::NotFound {
                resource: format!("User {}", user_id),
            });
        }
        Ok(())
    }

    async fn list_by_user(&mut self, user_id: Uuid) -> Result<Vec<Ticket>, DomainError> {
        let rows = sqlx::query(SELECT_BY_USER)
            .bind(user_id.to_string())
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| internal("Failed to list user tickets", e))?;

        rows_to_tickets(&rows)
    }

    async fn code_exists(&mut self, code: &str) -> Result<bool, DomainError> {
        let row = sqlx::query(CODE_EXISTS)
            .bind(code)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| internal("Failed to check code existence", e))?;

        let exists: i64 = row
            .try_get("code_exists")
            .map_err(|e| internal("Failed to get existence result", e))?;
        Ok(exists == 1)
    }

    async fn create(&mut self, ticket: Ticket) -> Result<Ticket, DomainError> {
        sqlx::query(INSERT_TICKET)
            .bind(ticket.id.to_string())
            .bind(&ticket.unique_code)
            .bind(ticket.user_id.to_string())
            .bind(ticket.created_at)
            .execute(&mut *self.tx)
            .await
            .map_err(insert_error)?;

        Ok(ticket)
    }

    async fn delete_by_id(&mut self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| internal("Failed to delete ticket", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| internal("Failed to commit transaction", e))
    }
}
