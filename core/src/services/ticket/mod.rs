//! Verification ticket manager
//!
//! Issues, rate-limits and rotates one-time verification codes:
//! - One request per user per delay window
//! - At most five outstanding tickets per user, oldest evicted first
//! - Globally unique codes drawn with a bounded retry loop
//! - Redeeming any ticket invalidates every ticket of its owner

mod code_generator;
mod config;
mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use code_generator::{CodeGenerator, RandomCodeGenerator};
pub use config::{max_window, TicketServiceConfig};
pub use service::TicketService;
