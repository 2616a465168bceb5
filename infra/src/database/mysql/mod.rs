//! MySQL repository implementations

mod ticket_repository_impl;

pub use ticket_repository_impl::{MySqlTicketRepository, MySqlTicketTransaction};
