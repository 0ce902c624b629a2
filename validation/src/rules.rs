//! Declarative property rules.
//!
//! [`RuleValidator`] collects per-property checks and reports one
//! [`ValidationError`] for every check that fails, in the order the rules
//! were added. The built-in rules use the same error codes and messages as
//! FluentValidation so clients can share error handling across services.

use crate::validator::{ValidationResult, Validator};
use mediator_core::{BoxFuture, ValidationError};
use tokio_util::sync::CancellationToken;

/// Error code of [`RuleValidator::not_empty`]
pub const NOT_EMPTY_CODE: &str = "NotEmptyValidator";

/// Error code of [`RuleValidator::max_length`]
pub const MAX_LENGTH_CODE: &str = "MaximumLengthValidator";

type Check<R> = Box<dyn Fn(&R) -> Option<ValidationError> + Send + Sync>;

/// Validator built from a list of property rules.
///
/// # Example
///
/// ```
/// use mediator_validation::RuleValidator;
///
/// struct CreateUser {
///     name: String,
///     age: u8,
/// }
///
/// let validator = RuleValidator::new()
///     .not_empty("Name", |request: &CreateUser| request.name.as_str())
///     .max_length("Name", 50, |request: &CreateUser| request.name.as_str())
///     .rule(
///         "Age",
///         "GreaterThanOrEqualValidator",
///         "'Age' must be greater than or equal to '18'.",
///         |request: &CreateUser| request.age >= 18,
///     );
/// assert_eq!(validator.len(), 3);
/// ```
pub struct RuleValidator<R> {
    checks: Vec<Check<R>>,
}

impl<R: 'static> RuleValidator<R> {
    /// Create a validator with no rules (always passes)
    #[must_use]
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a rule: when `predicate` returns `false`, report `error_code` and
    /// `error_message` against `property`
    #[must_use]
    pub fn rule<P>(
        mut self,
        property: impl Into<String>,
        error_code: impl Into<String>,
        error_message: impl Into<String>,
        predicate: P,
    ) -> Self
    where
        P: Fn(&R) -> bool + Send + Sync + 'static,
    {
        let error = ValidationError::new(error_code, error_message, property);
        self.checks.push(Box::new(move |request: &R| {
            (!predicate(request)).then(|| error.clone())
        }));
        self
    }

    /// Require a non-blank string property
    ///
    /// Whitespace-only values count as empty.
    #[must_use]
    pub fn not_empty<A>(mut self, property: impl Into<String>, accessor: A) -> Self
    where
        A: Fn(&R) -> &str + Send + Sync + 'static,
    {
        let property = property.into();
        self.checks.push(Box::new(move |request: &R| {
            accessor(request).trim().is_empty().then(|| {
                ValidationError::new(
                    NOT_EMPTY_CODE,
                    format!("'{property}' must not be empty."),
                    property.as_str(),
                )
            })
        }));
        self
    }

    /// Limit a string property to `max` characters
    #[must_use]
    pub fn max_length<A>(mut self, property: impl Into<String>, max: usize, accessor: A) -> Self
    where
        A: Fn(&R) -> &str + Send + Sync + 'static,
    {
        let property = property.into();
        self.checks.push(Box::new(move |request: &R| {
            let length = accessor(request).chars().count();
            (length > max).then(|| {
                ValidationError::new(
                    MAX_LENGTH_CODE,
                    format!(
                        "The length of '{property}' must be {max} characters or fewer. \
                         You entered {length} characters."
                    ),
                    property.as_str(),
                )
            })
        }));
        self
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Check if no rule has been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every rule synchronously
    #[must_use]
    pub fn check(&self, request: &R) -> Vec<ValidationError> {
        self.checks.iter().filter_map(|check| check(request)).collect()
    }
}

impl<R: 'static> Default for RuleValidator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> std::fmt::Debug for RuleValidator<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleValidator")
            .field("rules", &self.checks.len())
            .finish()
    }
}

impl<R: 'static> Validator<R> for RuleValidator<R> {
    fn validate<'a>(
        &'a self,
        request: &'a R,
        _cancellation: &'a CancellationToken,
    ) -> BoxFuture<'a, ValidationResult> {
        let errors = self.check(request);
        Box::pin(std::future::ready(Ok(errors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRequest {
        name: String,
    }

    fn name_rules() -> RuleValidator<TestRequest> {
        RuleValidator::new()
            .not_empty("Name", |request: &TestRequest| request.name.as_str())
            .max_length("Name", 5, |request: &TestRequest| request.name.as_str())
    }

    fn request(name: &str) -> TestRequest {
        TestRequest {
            name: name.to_string(),
        }
    }

    #[test]
    fn empty_name_fails_not_empty() {
        let errors = name_rules().check(&request(""));
        assert_eq!(
            errors,
            vec![ValidationError::new(
                "NotEmptyValidator",
                "'Name' must not be empty.",
                "Name"
            )]
        );
    }

    #[test]
    fn whitespace_counts_as_empty() {
        assert_eq!(name_rules().check(&request("   ")).len(), 1);
    }

    #[test]
    fn long_name_fails_max_length() {
        let errors = name_rules().check(&request("abcdefg"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_code(), MAX_LENGTH_CODE);
        assert_eq!(
            errors[0].error_message(),
            "The length of 'Name' must be 5 characters or fewer. You entered 7 characters."
        );
    }

    #[test]
    fn valid_name_passes() {
        assert!(name_rules().check(&request("test")).is_empty());
    }

    #[test]
    fn custom_rules_report_in_order() {
        let validator = RuleValidator::new()
            .rule("Name", "FirstRule", "first", |_: &TestRequest| false)
            .rule("Name", "Passing", "never", |_: &TestRequest| true)
            .rule("Name", "SecondRule", "second", |_: &TestRequest| false);

        let codes: Vec<String> = validator
            .check(&request("x"))
            .iter()
            .map(|error| error.error_code().to_string())
            .collect();
        assert_eq!(codes, vec!["FirstRule", "SecondRule"]);
    }

    #[test]
    fn no_rules_always_pass() {
        let validator = RuleValidator::<TestRequest>::default();
        assert!(validator.is_empty());
        assert!(validator.check(&request("")).is_empty());
    }
}
