//! Verification code validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Eight symbols from the uppercase alphanumeric alphabet
static TICKET_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9]{8}$").unwrap());

/// Normalize user input for a verification code: trims surrounding
/// whitespace and upper-cases ASCII letters
pub fn normalize_ticket_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Check if a string has the exact shape of a ticket code
pub fn is_valid_ticket_code(code: &str) -> bool {
    TICKET_CODE_REGEX.is_match(code)
}
