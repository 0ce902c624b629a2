//! Property-based tests for the outcome algebra.
//!
//! Verifies that:
//! 1. An `HttpOutcome` keeps any `u16` status and is a success exactly when
//!    it is 2xx
//! 2. Failure outcomes keep every validation error, in order
//! 3. Success outcomes never carry validation errors

#![allow(clippy::unwrap_used)]

use mediator_core::{
    Failure, FromValidationErrors, HttpOutcome, Outcome, RequestOutcome, StatusCode,
    ValidationError,
};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// A property name such as `Name` or `Address1`
fn property_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][a-zA-Z0-9]{0,15}").unwrap()
}

fn validation_error_strategy() -> impl Strategy<Value = ValidationError> {
    (
        prop::string::string_regex("[A-Z][a-zA-Z]{0,20}Validator").unwrap(),
        prop::string::string_regex("[^\r\n]{0,60}").unwrap(),
        property_strategy(),
    )
        .prop_map(|(code, message, property)| ValidationError::new(code, message, property))
}

fn validation_errors_strategy() -> impl Strategy<Value = Vec<ValidationError>> {
    prop::collection::vec(validation_error_strategy(), 0..8)
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn http_success_follows_status(code in any::<u16>()) {
        let outcome: HttpOutcome = HttpOutcome::status_code(code);
        prop_assert_eq!(outcome.is_success(), (200..=299).contains(&code));
        prop_assert_eq!(outcome.status(), code);
        prop_assert_eq!(outcome.http_status(), StatusCode::from_u16(code).ok());
    }

    #[test]
    fn http_value_does_not_change_success(code in any::<u16>(), value in any::<i64>()) {
        let outcome = HttpOutcome::success_with_status(value, code);
        prop_assert_eq!(outcome.is_success(), (200..=299).contains(&code));
        prop_assert_eq!(outcome.value(), Some(&value));
    }

    #[test]
    fn http_failure_keeps_any_status(code in any::<u16>(), errors in validation_errors_strategy()) {
        let outcome = HttpOutcome::<String>::failure(code, errors.clone());
        prop_assert_eq!(outcome.status(), code);
        prop_assert_eq!(outcome.is_success(), (200..=299).contains(&code));
        prop_assert_eq!(outcome.validation_errors(), errors.as_slice());
    }

    #[test]
    fn failure_keeps_errors_in_order(errors in validation_errors_strategy()) {
        let outcome: Outcome<String> = Outcome::failure(errors.clone());
        prop_assert!(!outcome.is_success());
        prop_assert!(outcome.value().is_none());
        prop_assert_eq!(outcome.validation_errors(), errors.as_slice());
    }

    #[test]
    fn bad_request_from_errors_is_400(errors in validation_errors_strategy()) {
        let outcome = HttpOutcome::<String>::from_validation_errors(errors.clone());
        prop_assert_eq!(outcome.http_status(), Some(StatusCode::BAD_REQUEST));
        prop_assert!(!RequestOutcome::is_success(&outcome));
        prop_assert_eq!(RequestOutcome::validation_errors(&outcome), errors.as_slice());
    }

    #[test]
    fn success_never_carries_errors(value in any::<String>()) {
        let outcome = Outcome::success(value.clone());
        prop_assert!(outcome.validation_errors().is_empty());
        prop_assert_eq!(outcome.error_code(), None);
        prop_assert_eq!(outcome.into_value(), Some(value));
    }

    #[test]
    fn failure_details_survive_result_conversion(
        code in "[A-Za-z]{1,12}",
        message in "[^\r\n]{0,40}",
        errors in validation_errors_strategy(),
    ) {
        let failure = Failure::new()
            .with_code(code.clone())
            .with_message(message.clone())
            .with_validation_errors(errors.clone());
        let result: Result<(), Failure> = Outcome::from(failure).into_result();
        let failure = result.unwrap_err();

        prop_assert_eq!(failure.error_code(), Some(code.as_str()));
        prop_assert_eq!(failure.error_message(), Some(message.as_str()));
        prop_assert_eq!(failure.validation_errors(), errors.as_slice());
    }
}
