//! # Mediator Core
//!
//! Outcome types, the request/handler abstraction and the dispatch facade of
//! the Mediator request pipeline.
//!
//! ## Core Concepts
//!
//! - **Request**: An immutable value describing work, typed with its outcome
//! - **Outcome**: Success with a value, or failure carrying error details
//! - **`HttpOutcome`**: An outcome tagged with an HTTP status code
//! - **`RequestHandler`**: The single component that handles one request type
//! - **Mediator**: Routes each request to its registered handler
//!
//! ## Error Channels
//!
//! Expected failures (validation, "not found", "unauthorized") are returned
//! as outcome data. [`MediatorError`] is reserved for dispatch problems,
//! cancellation and unexpected faults.
//!
//! ## Example
//!
//! ```
//! use mediator_core::{HandlerRegistry, Mediator, Outcome, Request};
//!
//! struct GetGreeting {
//!     name: String,
//! }
//!
//! impl Request for GetGreeting {
//!     type Output = Outcome<String>;
//! }
//!
//! # tokio_test::block_on(async {
//! let mut registry = HandlerRegistry::new();
//! registry
//!     .register_fn(|request: GetGreeting, _| async move {
//!         Ok(Outcome::success(format!("Hello {}", request.name)))
//!     })
//!     .ok();
//!
//! let mediator = Mediator::new(registry);
//! let outcome = mediator.send(GetGreeting { name: "test".to_string() }).await.ok();
//! assert!(outcome.is_some_and(|outcome| outcome.is_success()));
//! # });
//! ```

pub mod config;
pub mod error;
pub mod http_outcome;
pub mod mediator;
pub mod outcome;
pub mod registry;
pub mod request;
#[cfg(feature = "axum")]
pub mod response;
pub mod validation_error;

pub use config::{ConfigError, DuplicateHandlerPolicy, MediatorConfig, ValidationConfig};
pub use error::{MediatorError, OutcomeError};
pub use http_outcome::HttpOutcome;
pub use mediator::Mediator;
pub use outcome::{Failure, FromValidationErrors, Outcome, RequestOutcome};
pub use registry::{HandlerRegistry, SharedHandler};
pub use request::{
    BoxFuture, FactoryHandler, HandlerFn, HandlerResult, Request, RequestHandler, handler_fn,
    request_name,
};
pub use validation_error::ValidationError;

pub use http::StatusCode;
pub use tokio_util::sync::CancellationToken;
