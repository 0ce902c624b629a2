//! The validation decorator.
//!
//! [`ValidationDecorator`] wraps the handler registered for a request type.
//! Before the handler runs, every validator checks the request
//! concurrently; if any of them reports an error the handler is skipped and
//! a failure outcome carrying all errors is returned instead.
//!
//! The same decorator serves plain and HTTP outcomes. How the failure is
//! built is decided by the outcome's [`FromValidationErrors`] impl: a plain
//! failure for [`mediator_core::Outcome`], `400 Bad Request` for
//! [`mediator_core::HttpOutcome`].

use crate::validator::Validator;
use futures::future::join_all;
use mediator_core::{
    BoxFuture, FromValidationErrors, HandlerResult, MediatorError, Request, RequestHandler,
    SharedHandler, ValidationError, request_name,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Shared, type-erased validator for request `R`
pub type SharedValidator<R> = Arc<dyn Validator<R>>;

/// Runs validators before delegating to the wrapped handler.
pub struct ValidationDecorator<R: Request> {
    inner: SharedHandler<R>,
    validators: Vec<SharedValidator<R>>,
}

impl<R: Request> ValidationDecorator<R> {
    /// Wrap `inner` with `validators`, which report errors in this order
    #[must_use]
    pub fn new(inner: SharedHandler<R>, validators: Vec<SharedValidator<R>>) -> Self {
        Self { inner, validators }
    }

    /// Number of validators run per request
    #[must_use]
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Run every validator and merge their errors.
    ///
    /// Errors are ordered by validator, then by each validator's own order.
    ///
    /// # Errors
    ///
    /// - [`MediatorError::Cancelled`] if `cancellation` fires before all
    ///   validators complete
    /// - The first error returned by a validator, in validator order
    pub async fn validate(
        &self,
        request: &R,
        cancellation: &CancellationToken,
    ) -> Result<Vec<ValidationError>, MediatorError> {
        let checks = join_all(
            self.validators
                .iter()
                .map(|validator| validator.validate(request, cancellation)),
        );

        let results = tokio::select! {
            biased;
            () = cancellation.cancelled() => return Err(MediatorError::Cancelled),
            results = checks => results,
        };

        let mut errors = Vec::new();
        for result in results {
            errors.extend(result?);
        }
        Ok(errors)
    }
}

impl<R> RequestHandler<R> for ValidationDecorator<R>
where
    R: Request + Sync,
    R::Output: FromValidationErrors,
{
    fn handle(
        &self,
        request: R,
        cancellation: CancellationToken,
    ) -> BoxFuture<'_, HandlerResult<R>> {
        Box::pin(async move {
            let request_type = request_name::<R>();

            if self.validators.is_empty() {
                tracing::trace!(
                    "No validators found for request type {request_type}, skipping validation"
                );
                return self.inner.handle(request, cancellation).await;
            }

            let errors = self.validate(&request, &cancellation).await?;

            if !errors.is_empty() {
                let messages = errors
                    .iter()
                    .map(ValidationError::error_message)
                    .collect::<Vec<_>>()
                    .join(", ");
                tracing::trace!("Validation failed for request type {request_type}: {messages}");
                return Ok(R::Output::from_validation_errors(errors));
            }

            tracing::trace!("Validation succeeded for request type {request_type}");
            self.inner.handle(request, cancellation).await
        })
    }
}

impl<R: Request> std::fmt::Debug for ValidationDecorator<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationDecorator")
            .field("request", &request_name::<R>())
            .field("validators", &self.validators.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::validator::validator_fn;
    use mediator_core::{Outcome, handler_fn};

    struct Rename {
        name: String,
    }

    impl Request for Rename {
        type Output = Outcome<String>;
    }

    fn error(code: &str) -> ValidationError {
        ValidationError::new(code, "invalid", "Name")
    }

    fn decorator(validators: Vec<SharedValidator<Rename>>) -> ValidationDecorator<Rename> {
        let inner: SharedHandler<Rename> = Arc::new(handler_fn(|request: Rename, _| async move {
            Ok(Outcome::success(request.name))
        }));
        ValidationDecorator::new(inner, validators)
    }

    #[tokio::test]
    async fn merges_errors_in_validator_order() {
        let decorator = decorator(vec![
            Arc::new(validator_fn(|_: &Rename| vec![error("A1"), error("A2")])),
            Arc::new(validator_fn(|_: &Rename| Vec::new())),
            Arc::new(validator_fn(|_: &Rename| vec![error("C1")])),
        ]);
        assert_eq!(decorator.validator_count(), 3);

        let request = Rename { name: String::new() };
        let errors = decorator
            .validate(&request, &CancellationToken::new())
            .await
            .unwrap();
        let codes: Vec<&str> = errors.iter().map(ValidationError::error_code).collect();
        assert_eq!(codes, vec!["A1", "A2", "C1"]);
    }

    #[tokio::test]
    async fn passing_request_reaches_handler() {
        let decorator = decorator(vec![Arc::new(validator_fn(|_: &Rename| Vec::new()))]);
        let outcome = decorator
            .handle(Rename { name: "test".to_string() }, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::success("test".to_string()));
    }

    #[tokio::test]
    async fn failing_request_yields_failure_outcome() {
        let decorator = decorator(vec![Arc::new(validator_fn(|_: &Rename| {
            vec![error("NotEmptyValidator")]
        }))]);
        let outcome = decorator
            .handle(Rename { name: String::new() }, CancellationToken::new())
            .await
            .unwrap();

        assert!(outcome.is_failure());
        assert_eq!(outcome.error_code(), None);
        assert_eq!(outcome.validation_errors(), &[error("NotEmptyValidator")]);
    }
}
