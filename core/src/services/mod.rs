//! Business services containing domain logic and use cases.

pub mod account_verification;
pub mod clock;
pub mod ticket;

// Re-export commonly used types
pub use account_verification::{
    AccountVerificationService, NotificationServiceTrait, RequestCodeResult,
};
pub use clock::{Clock, SystemClock};
pub use ticket::{CodeGenerator, RandomCodeGenerator, TicketService, TicketServiceConfig};
