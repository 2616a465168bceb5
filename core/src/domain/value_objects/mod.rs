//! Value objects representing immutable domain concepts.

pub mod verification_purpose;

pub use verification_purpose::VerificationPurpose;
