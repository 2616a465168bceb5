pub mod ticket;

pub use ticket::{TicketRepository, TicketTransaction};

#[cfg(test)]
pub use ticket::MockTicketRepository;
