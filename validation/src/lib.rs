//! # Mediator Validation
//!
//! Validation layer for Mediator request handlers.
//!
//! This crate provides:
//! - [`Validator`]: the capability that checks a request and reports
//!   field-level [`mediator_core::ValidationError`]s
//! - [`validator_fn`] and [`RuleValidator`] for building validators
//! - [`ValidationDecorator`]: runs all validators concurrently before the
//!   wrapped handler and short-circuits with a failure outcome
//! - [`ValidationExt`]: adds the decorator to a registered handler
//!
//! ## Example
//!
//! ```
//! use mediator_core::{HandlerRegistry, Mediator, Outcome, Request};
//! use mediator_validation::{RuleValidator, ValidationExt};
//!
//! struct TestRequest {
//!     name: String,
//! }
//!
//! impl Request for TestRequest {
//!     type Output = Outcome<String>;
//! }
//!
//! # tokio_test::block_on(async {
//! let mut registry = HandlerRegistry::new();
//! registry
//!     .register_fn(|request: TestRequest, _| async move {
//!         Ok(Outcome::success(format!("Hello {}", request.name)))
//!     })
//!     .ok();
//! registry.add_validator::<TestRequest, _>(
//!     RuleValidator::new().not_empty("Name", |request: &TestRequest| request.name.as_str()),
//! );
//!
//! let mediator = Mediator::new(registry);
//!
//! let invalid = mediator.send(TestRequest { name: String::new() }).await.ok();
//! assert!(invalid.is_some_and(|outcome| outcome.validation_errors().len() == 1));
//!
//! let valid = mediator.send(TestRequest { name: "test".to_string() }).await.ok();
//! assert_eq!(valid.and_then(Outcome::into_value).as_deref(), Some("Hello test"));
//! # });
//! ```

pub mod decorator;
pub mod registry;
pub mod rules;
pub mod validator;

pub use decorator::{SharedValidator, ValidationDecorator};
pub use registry::ValidationExt;
pub use rules::RuleValidator;
pub use validator::{ValidationResult, Validator, ValidatorFn, validator_fn};
