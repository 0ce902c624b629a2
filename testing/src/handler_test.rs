//! Ergonomic testing utilities for request handlers
//!
//! This module provides a fluent API for testing handlers, with or without
//! validation, using readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // HandlerTest is the natural name

use mediator_core::{
    CancellationToken, FromValidationErrors, HandlerRegistry, HandlerResult, Mediator,
    MediatorConfig, MediatorError, Request, RequestHandler,
};
use mediator_validation::{SharedValidator, ValidationExt, Validator};
use std::sync::Arc;

/// Type alias for outcome assertion functions
type OutcomeAssertion<O> = Box<dyn FnOnce(&O)>;

/// Type alias for error assertion functions
type ErrorAssertion = Box<dyn FnOnce(&MediatorError)>;

/// Fluent API for testing a handler through the full dispatch pipeline
///
/// The handler is registered in a fresh registry, decorated with the given
/// validators, and invoked through a [`Mediator`].
///
/// # Example
///
/// ```
/// use mediator_core::{handler_fn, Outcome, Request};
/// use mediator_testing::HandlerTest;
/// use mediator_testing::mocks::StaticValidator;
///
/// struct TestRequest(String);
///
/// impl Request for TestRequest {
///     type Output = Outcome<String>;
/// }
///
/// # tokio_test::block_on(async {
/// HandlerTest::new(handler_fn(|request: TestRequest, _| async move {
///     Ok(Outcome::success(format!("Hello {}", request.0)))
/// }))
/// .given_validator(StaticValidator::passing())
/// .when_request(TestRequest("test".to_string()))
/// .then_outcome(|outcome| {
///     assert_eq!(outcome.value().map(String::as_str), Some("Hello test"));
/// })
/// .run()
/// .await;
/// # });
/// ```
pub struct HandlerTest<R: Request> {
    handler: Arc<dyn RequestHandler<R>>,
    config: MediatorConfig,
    validators: Vec<SharedValidator<R>>,
    request: Option<R>,
    cancelled: bool,
    outcome_assertions: Vec<OutcomeAssertion<R::Output>>,
    error_assertions: Vec<ErrorAssertion>,
}

impl<R> HandlerTest<R>
where
    R: Request + Sync,
    R::Output: FromValidationErrors,
{
    /// Create a new handler test for the given handler
    #[must_use]
    pub fn new(handler: impl RequestHandler<R> + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
            config: MediatorConfig::default(),
            validators: Vec::new(),
            request: None,
            cancelled: false,
            outcome_assertions: Vec::new(),
            error_assertions: Vec::new(),
        }
    }

    /// Set the registry configuration (Given)
    #[must_use]
    pub fn given_config(mut self, config: MediatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a validator in front of the handler (Given)
    #[must_use]
    pub fn given_validator(mut self, validator: impl Validator<R> + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Set the request to send (When)
    #[must_use]
    pub fn when_request(mut self, request: R) -> Self {
        self.request = Some(request);
        self
    }

    /// Send the request with an already cancelled token (When)
    #[must_use]
    pub const fn when_cancelled(mut self) -> Self {
        self.cancelled = true;
        self
    }

    /// Add an assertion about the returned outcome (Then)
    #[must_use]
    pub fn then_outcome<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&R::Output) + 'static,
    {
        self.outcome_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the returned error (Then)
    #[must_use]
    pub fn then_error<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&MediatorError) + 'static,
    {
        self.error_assertions.push(Box::new(assertion));
        self
    }

    /// Dispatch the request and return the raw result without assertions
    ///
    /// # Panics
    ///
    /// Panics if no request was set with `when_request()`.
    #[allow(clippy::expect_used)] // Test code can use expect
    pub async fn dispatch(mut self) -> HandlerResult<R> {
        let request = self
            .request
            .take()
            .expect("Request must be set with when_request()");
        let (mediator, cancellation) = self.build();
        mediator.send_with_cancellation(request, cancellation).await
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if no request was set, if outcome assertions were given but the
    /// dispatch failed (or the reverse), or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub async fn run(mut self) {
        let request = self
            .request
            .take()
            .expect("Request must be set with when_request()");
        let outcome_assertions = std::mem::take(&mut self.outcome_assertions);
        let error_assertions = std::mem::take(&mut self.error_assertions);

        let (mediator, cancellation) = self.build();
        match mediator.send_with_cancellation(request, cancellation).await {
            Ok(outcome) => {
                assert!(
                    error_assertions.is_empty(),
                    "Expected an error, but the request returned an outcome"
                );
                for assertion in outcome_assertions {
                    assertion(&outcome);
                }
            }
            Err(error) => {
                assert!(
                    outcome_assertions.is_empty(),
                    "Expected an outcome, but the request failed: {error}"
                );
                for assertion in error_assertions {
                    assertion(&error);
                }
            }
        }
    }

    fn build(self) -> (Mediator, CancellationToken) {
        let mut registry = HandlerRegistry::with_config(self.config);
        // A fresh registry has no handler to collide with.
        let _ = registry.register::<R, _>(self.handler);
        if !self.validators.is_empty() {
            registry.add_validation::<R>(self.validators);
        }

        let cancellation = CancellationToken::new();
        if self.cancelled {
            cancellation.cancel();
        }
        (Mediator::new(registry), cancellation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertions;
    use crate::mocks::{CountingHandler, FailingHandler, StaticValidator};
    use mediator_core::{HttpOutcome, Outcome, StatusCode, ValidationError};

    #[derive(Debug)]
    struct CreateItem;

    impl Request for CreateItem {
        type Output = HttpOutcome<u32>;
    }

    fn name_error() -> ValidationError {
        ValidationError::new("NotEmptyValidator", "'Name' must not be empty.", "Name")
    }

    #[tokio::test]
    async fn test_handler_test_success() {
        HandlerTest::new(CountingHandler::<CreateItem>::new(HttpOutcome::ok(7)))
            .given_validator(StaticValidator::passing())
            .when_request(CreateItem)
            .then_outcome(|outcome| {
                assertions::assert_success(outcome);
                assert_eq!(outcome.value(), Some(&7));
            })
            .run()
            .await;
    }

    #[tokio::test]
    async fn test_handler_test_invalid() {
        let handler = CountingHandler::<CreateItem>::new(HttpOutcome::ok(7));

        HandlerTest::new(handler.clone())
            .given_validator(StaticValidator::failing(vec![name_error()]))
            .when_request(CreateItem)
            .then_outcome(|outcome| {
                assert_eq!(outcome.http_status(), Some(StatusCode::BAD_REQUEST));
                assertions::assert_invalid(outcome, &["Name"]);
            })
            .run()
            .await;

        assert_eq!(handler.calls(), 0);
    }

    #[tokio::test]
    async fn test_handler_test_error() {
        HandlerTest::new(FailingHandler::<CreateItem>::new("boom"))
            .when_request(CreateItem)
            .then_error(|error| assert!(matches!(error, MediatorError::Failed(_))))
            .run()
            .await;
    }

    #[tokio::test]
    async fn test_handler_test_cancelled() {
        let result = HandlerTest::new(CountingHandler::<CreateItem>::new(HttpOutcome::ok(7)))
            .when_request(CreateItem)
            .when_cancelled()
            .dispatch()
            .await;
        assert!(matches!(result, Err(MediatorError::Cancelled)));
    }

    #[tokio::test]
    async fn test_handler_test_plain_outcome() {
        struct Ping;

        impl Request for Ping {
            type Output = Outcome;
        }

        HandlerTest::new(CountingHandler::<Ping>::new(Outcome::success(())))
            .when_request(Ping)
            .then_outcome(assertions::assert_success)
            .run()
            .await;
    }
}
