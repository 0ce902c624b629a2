//! The validator capability.
//!
//! A [`Validator`] inspects a borrowed request and reports zero or more
//! [`ValidationError`]s. Validators never see the handler and never mutate
//! the request; several of them run concurrently against the same request.

use mediator_core::{BoxFuture, MediatorError, ValidationError};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// What a validator resolves to: its errors in order, or a fault
pub type ValidationResult = Result<Vec<ValidationError>, MediatorError>;

/// Checks one request type and reports field-level problems.
///
/// Returning an empty list means the request passed. `Err` is reserved for
/// faults (e.g. a lookup that failed) and cancellation; it aborts the
/// request instead of producing a failure outcome.
///
/// # Example
///
/// ```
/// use mediator_core::{BoxFuture, CancellationToken, ValidationError};
/// use mediator_validation::{ValidationResult, Validator};
///
/// struct CreateUser {
///     email: String,
/// }
///
/// struct EmailValidator;
///
/// impl Validator<CreateUser> for EmailValidator {
///     fn validate<'a>(
///         &'a self,
///         request: &'a CreateUser,
///         _cancellation: &'a CancellationToken,
///     ) -> BoxFuture<'a, ValidationResult> {
///         Box::pin(async move {
///             if request.email.contains('@') {
///                 Ok(Vec::new())
///             } else {
///                 Ok(vec![ValidationError::new(
///                     "EmailValidator",
///                     "'Email' is not a valid email address.",
///                     "Email",
///                 )])
///             }
///         })
///     }
/// }
/// ```
pub trait Validator<R>: Send + Sync {
    /// Validate `request`, observing `cancellation` for long-running checks
    fn validate<'a>(
        &'a self,
        request: &'a R,
        cancellation: &'a CancellationToken,
    ) -> BoxFuture<'a, ValidationResult>;
}

impl<R, V> Validator<R> for Arc<V>
where
    V: Validator<R> + ?Sized,
{
    fn validate<'a>(
        &'a self,
        request: &'a R,
        cancellation: &'a CancellationToken,
    ) -> BoxFuture<'a, ValidationResult> {
        (**self).validate(request, cancellation)
    }
}

impl<R, V> Validator<R> for Box<V>
where
    V: Validator<R> + ?Sized,
{
    fn validate<'a>(
        &'a self,
        request: &'a R,
        cancellation: &'a CancellationToken,
    ) -> BoxFuture<'a, ValidationResult> {
        (**self).validate(request, cancellation)
    }
}

/// Validator backed by a synchronous closure.
///
/// Created by [`validator_fn`].
#[derive(Clone)]
pub struct ValidatorFn<F> {
    f: F,
}

/// Wrap a synchronous check as a [`Validator`].
///
/// # Example
///
/// ```
/// use mediator_core::ValidationError;
/// use mediator_validation::validator_fn;
///
/// struct Rename {
///     name: String,
/// }
///
/// let validator = validator_fn(|request: &Rename| {
///     if request.name.len() > 10 {
///         vec![ValidationError::new("MaximumLengthValidator", "'Name' is too long.", "Name")]
///     } else {
///         Vec::new()
///     }
/// });
/// # let _ = validator;
/// ```
pub const fn validator_fn<R, F>(f: F) -> ValidatorFn<F>
where
    F: Fn(&R) -> Vec<ValidationError> + Send + Sync,
{
    ValidatorFn { f }
}

impl<R, F> Validator<R> for ValidatorFn<F>
where
    F: Fn(&R) -> Vec<ValidationError> + Send + Sync,
{
    fn validate<'a>(
        &'a self,
        request: &'a R,
        _cancellation: &'a CancellationToken,
    ) -> BoxFuture<'a, ValidationResult> {
        let errors = (self.f)(request);
        Box::pin(std::future::ready(Ok(errors)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Rename {
        name: String,
    }

    #[tokio::test]
    async fn closure_validator_reports_errors() {
        let validator = validator_fn(|request: &Rename| {
            if request.name.is_empty() {
                vec![ValidationError::new("NotEmptyValidator", "'Name' must not be empty.", "Name")]
            } else {
                Vec::new()
            }
        });
        let token = CancellationToken::new();

        let invalid = Rename { name: String::new() };
        let errors = validator.validate(&invalid, &token).await.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property_name(), "Name");

        let valid = Rename { name: "test".to_string() };
        assert!(validator.validate(&valid, &token).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn shared_validators_delegate() {
        let validator: Arc<dyn Validator<Rename>> =
            Arc::new(validator_fn(|_: &Rename| Vec::new()));
        let request = Rename { name: "x".to_string() };

        let errors = validator
            .validate(&request, &CancellationToken::new())
            .await
            .unwrap();
        assert!(errors.is_empty());
    }
}
