//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address check: local part, a single @, dotted domain
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$").unwrap()
});

/// Normalize an email address by trimming whitespace and lower-casing it
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Mask an email address for logging (e.g., jo***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Traveller@Example.COM "), "traveller@example.com");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("traveller@example.com"));
        assert!(is_valid_email("first.last+trips@mail.example.co.id"));
        assert!(!is_valid_email("traveller@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("traveller@example"));
        assert!(!is_valid_email("two@@example.com"));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("traveller@example.com"), "tr***@example.com");
        assert_eq!(mask_email("a@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
