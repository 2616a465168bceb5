//! Unit tests for domain error types

use tk_shared::errors::{error_codes, IntoErrorResponse};

use crate::errors::{DomainError, TicketError};

#[test]
fn test_rate_limited_message_contains_wait_time() {
    let error = TicketError::RateLimited { seconds_remaining: 299 };
    assert!(error.to_string().contains("299 seconds"));
}

#[test]
fn test_not_found_and_unauthorized_look_identical_to_callers() {
    let not_found: DomainError = TicketError::NotFound.into();
    let unauthorized: DomainError = TicketError::Unauthorized.into();

    assert_eq!(not_found.error_code(), unauthorized.error_code());
    assert_eq!(not_found.error_code(), error_codes::VERIFICATION_CODE_INVALID);

    let a = not_found.to_error_response();
    let b = unauthorized.to_error_response();
    assert_eq!(a.error, b.error);
    assert_eq!(a.message, b.message);
    assert!(TicketError::Unauthorized.is_invalid_code());
    assert!(!TicketError::Expired.is_invalid_code());
}

#[test]
fn test_rate_limited_response_carries_retry_after() {
    let error: DomainError = TicketError::RateLimited { seconds_remaining: 120 }.into();
    let response = error.to_error_response();

    assert_eq!(response.error, error_codes::RATE_LIMIT_EXCEEDED);
    let details = response.details.expect("rate limit response should carry details");
    assert_eq!(details.get("retry_after"), Some(&serde_json::json!(120)));
}

#[test]
fn test_internal_details_are_not_exposed() {
    let error = DomainError::Internal {
        message: "connection refused by 10.0.0.7".to_string(),
    };
    let response = error.to_error_response();

    assert_eq!(response.error, error_codes::INTERNAL_ERROR);
    assert!(!response.message.contains("10.0.0.7"));
}

#[test]
fn test_exhaustion_maps_to_internal_error() {
    let error: DomainError = TicketError::CodeSpaceExhausted { attempts: 10 }.into();
    assert_eq!(error.error_code(), error_codes::INTERNAL_ERROR);
    assert!(error.to_string().contains("10 attempts"));
    assert_eq!(
        error.as_ticket_error(),
        Some(&TicketError::CodeSpaceExhausted { attempts: 10 })
    );
}

#[test]
fn test_expired_code() {
    let error: DomainError = TicketError::Expired.into();
    assert_eq!(error.error_code(), error_codes::VERIFICATION_CODE_EXPIRED);
    assert_eq!(error.to_error_response().message, "Verification code expired");
}
