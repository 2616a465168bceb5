//! Account verification flows built on verification tickets
//!
//! Registration, login and password reset all follow the same shape: issue a
//! ticket for the account, deliver its code out of band, then redeem the code
//! the user types back in.

mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use service::AccountVerificationService;
pub use traits::NotificationServiceTrait;
pub use types::RequestCodeResult;
