//! The outcome algebra returned by request handlers.
//!
//! Handlers report expected failures as data rather than errors:
//!
//! - [`Outcome::Success`] carries the handler's value (`()` for requests
//!   without a result).
//! - [`Outcome::Failure`] carries a [`Failure`]: an optional error code, an
//!   optional error message and any number of [`ValidationError`]s. Both
//!   channels may be populated at the same time.
//!
//! `Err` values are reserved for the paths that are not data: programmer
//! errors, cancellation and faults (see [`crate::error`]).
//!
//! # Example
//!
//! ```
//! use mediator_core::{Outcome, ValidationError};
//!
//! let ok: Outcome<String> = Outcome::success("Hello test".to_string());
//! assert!(ok.is_success());
//! assert_eq!(ok.value().map(String::as_str), Some("Hello test"));
//!
//! let invalid: Outcome<String> = Outcome::failure(vec![ValidationError::new(
//!     "NotEmptyValidator",
//!     "'Name' must not be empty.",
//!     "Name",
//! )]);
//! assert!(!invalid.is_success());
//! assert_eq!(invalid.validation_errors().len(), 1);
//! assert!(invalid.error_code().is_none());
//! ```

use crate::error::OutcomeError;
use crate::validation_error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error details of a failed outcome.
///
/// Built with [`Failure::new`] and the `with_*` methods, or with the
/// shortcuts on [`Outcome`] and [`crate::HttpOutcome`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    error_code: Option<String>,
    error_message: Option<String>,
    validation_errors: Vec<ValidationError>,
}

impl Failure {
    /// Create empty failure details (no code, no message, no validation errors)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            error_code: None,
            error_message: None,
            validation_errors: Vec::new(),
        }
    }

    /// Failure details carrying only validation errors
    #[must_use]
    pub fn validation(validation_errors: impl IntoIterator<Item = ValidationError>) -> Self {
        Self::new().with_validation_errors(validation_errors)
    }

    /// Set the error code
    #[must_use]
    pub fn with_code(mut self, error_code: impl Into<String>) -> Self {
        self.error_code = Some(error_code.into());
        self
    }

    /// Set the error message
    #[must_use]
    pub fn with_message(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self
    }

    /// Append validation errors, keeping their order
    #[must_use]
    pub fn with_validation_errors(
        mut self,
        validation_errors: impl IntoIterator<Item = ValidationError>,
    ) -> Self {
        self.validation_errors.extend(validation_errors);
        self
    }

    /// The error code, if any
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    /// The error message, if any
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The validation errors in reporting order
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.validation_errors
    }

    /// Take ownership of the validation errors
    #[must_use]
    pub fn into_validation_errors(self) -> Vec<ValidationError> {
        self.validation_errors
    }

    /// Check whether no detail is set at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.error_code.is_none()
            && self.error_message.is_none()
            && self.validation_errors.is_empty()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error_code, &self.error_message) {
            (Some(code), Some(message)) => write!(f, "[{code}] {message}")?,
            (Some(code), None) => write!(f, "[{code}]")?,
            (None, Some(message)) => write!(f, "{message}")?,
            (None, None) => write!(f, "request failed")?,
        }
        if !self.validation_errors.is_empty() {
            write!(f, " ({} validation errors)", self.validation_errors.len())?;
        }
        Ok(())
    }
}

impl std::error::Error for Failure {}

/// The result of executing a request handler.
///
/// `Outcome<()>` is the outcome of requests that produce no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T = ()> {
    /// The request succeeded with a value
    Success(T),

    /// The request failed; see [`Failure`] for the details
    Failure(Failure),
}

impl<T> Outcome<T> {
    /// Create a success outcome carrying `value`
    #[must_use]
    pub const fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Create a success outcome from a value that may be absent
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::MissingValue`] if `value` is `None`: a
    /// successful outcome always carries a value.
    pub fn try_success(value: Option<T>) -> Result<Self, OutcomeError> {
        value.map(Self::Success).ok_or(OutcomeError::MissingValue)
    }

    /// Create a failure outcome carrying only validation errors
    #[must_use]
    pub fn failure(validation_errors: impl IntoIterator<Item = ValidationError>) -> Self {
        Self::Failure(Failure::validation(validation_errors))
    }

    /// Create a failure outcome carrying an error code and message
    #[must_use]
    pub fn error(error_code: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self::Failure(
            Failure::new()
                .with_code(error_code)
                .with_message(error_message),
        )
    }

    /// Check if the outcome is a success
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if the outcome is a failure
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The success value, if any
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Consume the outcome, returning the success value if any
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The failure details, if any
    #[must_use]
    pub const fn failure_details(&self) -> Option<&Failure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Validation errors (always empty for a success)
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(failure) => failure.validation_errors(),
        }
    }

    /// Error code of a failure
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.failure_details().and_then(Failure::error_code)
    }

    /// Error message of a failure
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.failure_details().and_then(Failure::error_message)
    }

    /// Transform the success value, leaving failures untouched
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Convert into a standard `Result`
    ///
    /// # Errors
    ///
    /// Returns the [`Failure`] details when the outcome is a failure.
    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(failure) => Err(failure),
        }
    }
}

impl<T> From<Failure> for Outcome<T> {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}

impl<T> From<Outcome<T>> for Result<T, Failure> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

/// Read-only view shared by every outcome type.
///
/// Lets generic code (logging, the dispatch facade) inspect an outcome
/// without knowing whether it is an [`Outcome`] or a [`crate::HttpOutcome`].
pub trait RequestOutcome {
    /// Whether the outcome is a success
    fn is_success(&self) -> bool;

    /// Validation errors carried by the outcome
    fn validation_errors(&self) -> &[ValidationError];

    /// Error code carried by the outcome
    fn error_code(&self) -> Option<&str>;

    /// Error message carried by the outcome
    fn error_message(&self) -> Option<&str>;
}

/// Construction strategy for validation failures.
///
/// The validation decorator is generic over the outcome type and uses this
/// trait to build the short-circuit failure: a plain failure for
/// [`Outcome`], `400 Bad Request` for [`crate::HttpOutcome`].
pub trait FromValidationErrors {
    /// Build the failure outcome for a non-empty list of validation errors
    fn from_validation_errors(validation_errors: Vec<ValidationError>) -> Self;
}

impl<T> RequestOutcome for Outcome<T> {
    fn is_success(&self) -> bool {
        Outcome::is_success(self)
    }

    fn validation_errors(&self) -> &[ValidationError] {
        Outcome::validation_errors(self)
    }

    fn error_code(&self) -> Option<&str> {
        Outcome::error_code(self)
    }

    fn error_message(&self) -> Option<&str> {
        Outcome::error_message(self)
    }
}

impl<T> FromValidationErrors for Outcome<T> {
    fn from_validation_errors(validation_errors: Vec<ValidationError>) -> Self {
        Self::failure(validation_errors)
    }
}
