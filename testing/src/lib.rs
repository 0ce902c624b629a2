//! # Mediator Testing
//!
//! Testing utilities and helpers for Mediator handlers and validators.
//!
//! This crate provides:
//! - Mock handlers and validators that record how often they ran
//! - [`HandlerTest`], a fluent Given-When-Then runner
//! - Assertion helpers for outcomes
//! - proptest strategies for validation errors
//!
//! ## Example
//!
//! ```
//! use mediator_core::{Outcome, Request, ValidationError};
//! use mediator_testing::HandlerTest;
//! use mediator_testing::mocks::{CountingHandler, StaticValidator};
//!
//! struct TestRequest;
//!
//! impl Request for TestRequest {
//!     type Output = Outcome<String>;
//! }
//!
//! # tokio_test::block_on(async {
//! let handler = CountingHandler::<TestRequest>::new(Outcome::success("done".to_string()));
//!
//! HandlerTest::new(handler.clone())
//!     .given_validator(StaticValidator::failing(vec![ValidationError::new(
//!         "NotEmptyValidator",
//!         "'Name' must not be empty.",
//!         "Name",
//!     )]))
//!     .when_request(TestRequest)
//!     .then_outcome(|outcome| assert_eq!(outcome.validation_errors().len(), 1))
//!     .run()
//!     .await;
//!
//! assert_eq!(handler.calls(), 0);
//! # });
//! ```

mod handler_test;

pub use handler_test::HandlerTest;

/// Mock handlers and validators.
pub mod mocks {
    use mediator_core::{
        BoxFuture, CancellationToken, HandlerResult, MediatorError, Request, RequestHandler,
        ValidationError,
    };
    use mediator_validation::{ValidationResult, Validator};
    use std::marker::PhantomData;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Handler that returns a fixed outcome and counts its calls.
    ///
    /// Clones share the counter, so a test can keep one clone and register
    /// the other.
    pub struct CountingHandler<R: Request> {
        outcome: R::Output,
        calls: Arc<AtomicUsize>,
    }

    impl<R> CountingHandler<R>
    where
        R: Request,
        R::Output: Clone + Sync,
    {
        /// Create a handler answering every request with `outcome`
        #[must_use]
        pub fn new(outcome: R::Output) -> Self {
            Self {
                outcome,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Number of requests handled so far
        #[must_use]
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl<R> Clone for CountingHandler<R>
    where
        R: Request,
        R::Output: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                outcome: self.outcome.clone(),
                calls: Arc::clone(&self.calls),
            }
        }
    }

    impl<R> RequestHandler<R> for CountingHandler<R>
    where
        R: Request,
        R::Output: Clone + Sync,
    {
        fn handle(
            &self,
            _request: R,
            _cancellation: CancellationToken,
        ) -> BoxFuture<'_, HandlerResult<R>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self.outcome.clone();
            Box::pin(async move { Ok(outcome) })
        }
    }

    /// Handler that always fails with [`MediatorError::Failed`]
    pub struct FailingHandler<R> {
        message: String,
        _request: PhantomData<fn() -> R>,
    }

    impl<R> FailingHandler<R> {
        /// Create a handler failing with `message`
        #[must_use]
        pub fn new(message: impl Into<String>) -> Self {
            Self {
                message: message.into(),
                _request: PhantomData,
            }
        }
    }

    impl<R: Request> RequestHandler<R> for FailingHandler<R> {
        fn handle(
            &self,
            _request: R,
            _cancellation: CancellationToken,
        ) -> BoxFuture<'_, HandlerResult<R>> {
            let error = MediatorError::Failed(anyhow::anyhow!("{}", self.message));
            Box::pin(async move { Err(error) })
        }
    }

    /// Validator that returns fixed errors for any request and counts its calls
    #[derive(Debug, Clone, Default)]
    pub struct StaticValidator {
        errors: Vec<ValidationError>,
        calls: Arc<AtomicUsize>,
    }

    impl StaticValidator {
        /// Validator that accepts every request
        #[must_use]
        pub fn passing() -> Self {
            Self::default()
        }

        /// Validator that reports `errors` for every request
        #[must_use]
        pub fn failing(errors: Vec<ValidationError>) -> Self {
            Self {
                errors,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Number of requests validated so far
        #[must_use]
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl<R> Validator<R> for StaticValidator {
        fn validate<'a>(
            &'a self,
            _request: &'a R,
            _cancellation: &'a CancellationToken,
        ) -> BoxFuture<'a, ValidationResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(std::future::ready(Ok(self.errors.clone())))
        }
    }

    /// Validator that never finishes until its token is cancelled.
    ///
    /// Signals [`PendingValidator::started`] once validation begins.
    #[derive(Debug, Clone, Default)]
    pub struct PendingValidator {
        started: Arc<Notify>,
    }

    impl PendingValidator {
        /// Create a pending validator
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Wait until some request is being validated
        pub async fn started(&self) {
            self.started.notified().await;
        }
    }

    impl<R> Validator<R> for PendingValidator {
        fn validate<'a>(
            &'a self,
            _request: &'a R,
            cancellation: &'a CancellationToken,
        ) -> BoxFuture<'a, ValidationResult> {
            Box::pin(async move {
                self.started.notify_one();
                cancellation.cancelled().await;
                Err(MediatorError::Cancelled)
            })
        }
    }
}

/// Assertion helpers for outcomes
pub mod assertions {
    use mediator_core::RequestOutcome;

    /// Assert that an outcome is a success without errors
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a failure.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_success<O: RequestOutcome>(outcome: &O) {
        assert!(
            outcome.is_success(),
            "Expected success, but found failure (code: {:?}, message: {:?}, {} validation errors)",
            outcome.error_code(),
            outcome.error_message(),
            outcome.validation_errors().len()
        );
    }

    /// Assert that an outcome failed with errors on exactly `properties`, in order
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a success or the failing properties differ.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_invalid<O: RequestOutcome>(outcome: &O, properties: &[&str]) {
        assert!(!outcome.is_success(), "Expected failure, but found success");
        let actual: Vec<&str> = outcome
            .validation_errors()
            .iter()
            .map(mediator_core::ValidationError::property_name)
            .collect();
        assert_eq!(
            actual, properties,
            "Expected validation errors on {properties:?}, but found {actual:?}"
        );
    }
}

/// Property-based testing utilities
pub mod properties {
    use mediator_core::ValidationError;
    use proptest::prelude::*;

    /// A `PascalCase` property name
    pub fn property_name() -> impl Strategy<Value = String> {
        "[A-Z][a-zA-Z0-9]{0,15}"
    }

    /// A FluentValidation-style error code such as `NotEmptyValidator`
    pub fn error_code() -> impl Strategy<Value = String> {
        "[A-Z][a-zA-Z]{0,20}Validator"
    }

    /// A single validation error
    pub fn validation_error() -> impl Strategy<Value = ValidationError> {
        (error_code(), "[^\r\n]{0,60}", property_name())
            .prop_map(|(code, message, property)| ValidationError::new(code, message, property))
    }

    /// Up to `max` validation errors
    pub fn validation_errors(max: usize) -> impl Strategy<Value = Vec<ValidationError>> {
        prop::collection::vec(validation_error(), 0..=max)
    }
}

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new("mediator_core=trace,mediator_validation=trace")
        });
    // Already installed by another test.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
