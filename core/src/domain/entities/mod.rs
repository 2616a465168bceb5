//! Domain entities representing core business objects.

pub mod ticket;

pub use ticket::Ticket;
