//! Field-level validation problems.
//!
//! A [`ValidationError`] is the unit that validators report and that failure
//! outcomes carry. All three fields are always present; there is no partial
//! record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One field-level problem found while validating a request.
///
/// # Example
///
/// ```
/// use mediator_core::ValidationError;
///
/// let error = ValidationError::new("NotEmptyValidator", "'Name' must not be empty.", "Name");
/// assert_eq!(error.property_name(), "Name");
/// assert_eq!(error.to_string(), "Name: 'Name' must not be empty. (NotEmptyValidator)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    error_code: String,
    error_message: String,
    property_name: String,
}

impl ValidationError {
    /// Create a validation error from its code, message and property name
    #[must_use]
    pub fn new(
        error_code: impl Into<String>,
        error_message: impl Into<String>,
        property_name: impl Into<String>,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            error_message: error_message.into(),
            property_name: property_name.into(),
        }
    }

    /// Machine-readable error code (e.g. `NotEmptyValidator`)
    #[must_use]
    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    /// Human-readable message
    #[must_use]
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Name of the request property that failed validation
    #[must_use]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.property_name, self.error_message, self.error_code
        )
    }
}
