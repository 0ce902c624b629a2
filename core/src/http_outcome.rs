//! Outcomes of requests answered over HTTP.
//!
//! [`HttpOutcome`] adds a status code to the outcome algebra. The status is a
//! plain `u16` and may hold any value, including codes outside the range
//! [`StatusCode`] can represent. Success is derived **only** from the status:
//! `200..=299` is a success, everything else is a failure, whatever
//! constructor produced it. The status code and [`HttpOutcome::is_success`]
//! therefore never disagree.
//!
//! Constructors taking a status accept either a [`StatusCode`] or a raw
//! `u16`.

use crate::error::OutcomeError;
use crate::outcome::{Failure, FromValidationErrors, RequestOutcome};
use crate::validation_error::ValidationError;
use http::StatusCode;

/// The result of executing an HTTP request handler.
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use mediator_core::{HttpOutcome, ValidationError};
///
/// let ok = HttpOutcome::ok(vec!["Test1", "Test2"]);
/// assert!(ok.is_success());
/// assert_eq!(ok.status(), 200);
///
/// let invalid: HttpOutcome<String> = HttpOutcome::bad_request(vec![
///     ValidationError::new("NotEmptyValidator", "'Name' must not be empty.", "Name"),
/// ]);
/// assert!(!invalid.is_success());
/// assert_eq!(invalid.http_status(), Some(StatusCode::BAD_REQUEST));
///
/// let custom = HttpOutcome::<()>::status_code(1042_u16);
/// assert!(!custom.is_success());
/// assert_eq!(custom.http_status(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOutcome<T = ()> {
    status: u16,
    value: Option<T>,
    details: Failure,
}

impl<T> HttpOutcome<T> {
    fn with_details(status: impl Into<u16>, value: Option<T>, details: Failure) -> Self {
        Self {
            status: status.into(),
            value,
            details,
        }
    }

    /// `200 OK` carrying `value`
    #[must_use]
    pub fn ok(value: T) -> Self {
        Self::with_details(StatusCode::OK, Some(value), Failure::new())
    }

    /// `200 OK` from a value that may be absent
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::MissingValue`] if `value` is `None`.
    pub fn try_ok(value: Option<T>) -> Result<Self, OutcomeError> {
        value.map(Self::ok).ok_or(OutcomeError::MissingValue)
    }

    /// Success carrying `value` with status `200 OK`
    #[must_use]
    pub fn success(value: T) -> Self {
        Self::ok(value)
    }

    /// Outcome carrying `value` with an explicit status
    ///
    /// Success still follows the status: a non-2xx status yields a failure.
    #[must_use]
    pub fn success_with_status(value: T, status: impl Into<u16>) -> Self {
        Self::with_details(status, Some(value), Failure::new())
    }

    /// `204 No Content`
    #[must_use]
    pub fn no_content() -> Self {
        Self::no_content_with_status(StatusCode::NO_CONTENT)
    }

    /// Valueless outcome with an explicit status (e.g. `202 Accepted`)
    #[must_use]
    pub fn no_content_with_status(status: impl Into<u16>) -> Self {
        Self::with_details(status, None, Failure::new())
    }

    /// `401 Unauthorized` without error details
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::with_details(StatusCode::UNAUTHORIZED, None, Failure::new())
    }

    /// `401 Unauthorized` with an optional error code and message
    #[must_use]
    pub fn unauthorized_with(error_code: Option<String>, error_message: Option<String>) -> Self {
        Self::with_details(
            StatusCode::UNAUTHORIZED,
            None,
            details_from(error_code, error_message),
        )
    }

    /// `400 Bad Request` carrying validation errors
    #[must_use]
    pub fn bad_request(validation_errors: impl IntoIterator<Item = ValidationError>) -> Self {
        Self::failure(StatusCode::BAD_REQUEST, validation_errors)
    }

    /// `400 Bad Request` carrying validation errors and an optional code and message
    #[must_use]
    pub fn bad_request_with(
        validation_errors: impl IntoIterator<Item = ValidationError>,
        error_code: Option<String>,
        error_message: Option<String>,
    ) -> Self {
        Self::failure_with(
            StatusCode::BAD_REQUEST,
            details_from(error_code, error_message).with_validation_errors(validation_errors),
        )
    }

    /// Bare status code with no payload and no error details
    ///
    /// Any `u16` is accepted; codes without a [`StatusCode`] are kept as is.
    #[must_use]
    pub fn status_code(status: impl Into<u16>) -> Self {
        Self::with_details(status, None, Failure::new())
    }

    /// Outcome with the given status carrying validation errors
    #[must_use]
    pub fn failure(
        status: impl Into<u16>,
        validation_errors: impl IntoIterator<Item = ValidationError>,
    ) -> Self {
        Self::failure_with(status, Failure::validation(validation_errors))
    }

    /// Outcome with the given status carrying arbitrary error details
    #[must_use]
    pub fn failure_with(status: impl Into<u16>, details: Failure) -> Self {
        Self::with_details(status, None, details)
    }

    /// Attach a response payload, e.g. a problem document on a failure
    #[must_use]
    pub fn with_value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    /// The raw HTTP status code
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// The status as a [`StatusCode`], or `None` outside `100..=999`
    #[must_use]
    pub fn http_status(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status).ok()
    }

    /// Check if the status code is in `200..=299`
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }

    /// Check if the status code is exactly `200 OK`
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// The response payload, if any
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Consume the outcome, returning the payload if any
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Validation errors in reporting order
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        self.details.validation_errors()
    }

    /// The error code, if any
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.details.error_code()
    }

    /// The error message, if any
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.details.error_message()
    }

    /// The error details (empty for outcomes built by success constructors)
    #[must_use]
    pub const fn details(&self) -> &Failure {
        &self.details
    }

    /// Split into raw status, payload and error details
    #[must_use]
    pub fn into_parts(self) -> (u16, Option<T>, Failure) {
        (self.status, self.value, self.details)
    }
}

fn details_from(error_code: Option<String>, error_message: Option<String>) -> Failure {
    let details = Failure::new();
    let details = match error_code {
        Some(code) => details.with_code(code),
        None => details,
    };
    match error_message {
        Some(message) => details.with_message(message),
        None => details,
    }
}

impl<T> RequestOutcome for HttpOutcome<T> {
    fn is_success(&self) -> bool {
        HttpOutcome::is_success(self)
    }

    fn validation_errors(&self) -> &[ValidationError] {
        HttpOutcome::validation_errors(self)
    }

    fn error_code(&self) -> Option<&str> {
        HttpOutcome::error_code(self)
    }

    fn error_message(&self) -> Option<&str> {
        HttpOutcome::error_message(self)
    }
}

impl<T> FromValidationErrors for HttpOutcome<T> {
    fn from_validation_errors(validation_errors: Vec<ValidationError>) -> Self {
        Self::bad_request(validation_errors)
    }
}
