//! # TripKit Core
//!
//! Core business logic and domain layer for the TripKit backend.
//! This crate contains the verification ticket entity, the services that
//! issue and redeem tickets, repository interfaces, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Ticket, VerificationPurpose};
pub use errors::{DomainError, DomainResult, TicketError};
pub use repositories::{TicketRepository, TicketTransaction};
pub use services::{
    AccountVerificationService, Clock, CodeGenerator, NotificationServiceTrait,
    RandomCodeGenerator, RequestCodeResult, SystemClock, TicketService, TicketServiceConfig,
};
