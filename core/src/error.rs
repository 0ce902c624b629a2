//! Error types for outcome construction and request dispatch.
//!
//! Expected failures (validation, business rules) are outcome *data* and never
//! appear here. These errors cover the remaining paths: programmer errors at
//! construction time, dispatch problems, cancellation and opaque faults
//! raised by handlers or validators.

use thiserror::Error;

/// Argument errors raised by the fallible outcome constructors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutcomeError {
    /// A success outcome was constructed without a value
    #[error("Value cannot be absent for a successful outcome")]
    MissingValue,
}

/// Errors that can occur while dispatching a request
#[derive(Error, Debug)]
pub enum MediatorError {
    /// No handler is registered for the request type
    #[error("No handler registered for request type {request}")]
    HandlerNotFound {
        /// Type name of the request
        request: &'static str,
    },

    /// A handler is already registered and the registry rejects duplicates
    #[error("A handler is already registered for request type {request}")]
    DuplicateHandler {
        /// Type name of the request
        request: &'static str,
    },

    /// The caller's cancellation token fired before the request completed
    #[error("Request was cancelled")]
    Cancelled,

    /// A handler or validator failed with an unexpected error
    ///
    /// Propagated unchanged through the validation pipeline.
    #[error("Request processing failed: {0}")]
    Failed(#[from] anyhow::Error),
}

impl MediatorError {
    /// Check if this error is a cancellation
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
