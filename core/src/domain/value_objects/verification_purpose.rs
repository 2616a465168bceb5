//! Reason a verification code is requested.

use serde::{Deserialize, Serialize};

/// Account flow a verification ticket is issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPurpose {
    /// Confirming a newly registered account
    Registration,
    /// Passwordless or second-step login
    Login,
    /// Authorizing a password reset
    PasswordReset,
}

impl VerificationPurpose {
    /// Subject line used when the code is delivered by email
    pub fn subject(&self) -> &'static str {
        match self {
            VerificationPurpose::Registration => "Confirm your TripKit account",
            VerificationPurpose::Login => "Your TripKit login code",
            VerificationPurpose::PasswordReset => "Reset your TripKit password",
        }
    }

    /// Stable identifier for logs and templates
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationPurpose::Registration => "registration",
            VerificationPurpose::Login => "login",
            VerificationPurpose::PasswordReset => "password_reset",
        }
    }
}

impl std::fmt::Display for VerificationPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
