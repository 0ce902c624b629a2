//! Requests and the handler capability.
//!
//! A [`Request`] names its outcome type through [`Request::Output`]; a
//! [`RequestHandler`] for that request must produce exactly that type, so the
//! request/response pairing is checked by the compiler.
//!
//! # Dyn Compatibility
//!
//! [`RequestHandler::handle`] returns a boxed future instead of using
//! `async fn`, so handlers can be stored as `Arc<dyn RequestHandler<R>>` in
//! the registry and wrapped by decorators.

use crate::error::MediatorError;
use crate::outcome::RequestOutcome;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Boxed future returned by handlers and validators
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What a handler for request `R` resolves to
pub type HandlerResult<R> = Result<<R as Request>::Output, MediatorError>;

/// An immutable value describing work to perform.
///
/// Usually implemented with `#[derive(Request)]` from `mediator-macros`.
///
/// # Example
///
/// ```
/// use mediator_core::{Outcome, Request};
///
/// struct GetGreeting {
///     name: String,
/// }
///
/// impl Request for GetGreeting {
///     type Output = Outcome<String>;
/// }
/// ```
pub trait Request: Send + 'static {
    /// The outcome type handlers produce for this request
    type Output: RequestOutcome + Send + 'static;
}

/// The single component that performs the work for request type `R`.
pub trait RequestHandler<R: Request>: Send + Sync {
    /// Handle the request.
    ///
    /// Expected failures are returned as outcome data; `Err` is reserved for
    /// cancellation and unexpected faults.
    fn handle(
        &self,
        request: R,
        cancellation: CancellationToken,
    ) -> BoxFuture<'_, HandlerResult<R>>;
}

impl<R, H> RequestHandler<R> for Arc<H>
where
    R: Request,
    H: RequestHandler<R> + ?Sized,
{
    fn handle(
        &self,
        request: R,
        cancellation: CancellationToken,
    ) -> BoxFuture<'_, HandlerResult<R>> {
        (**self).handle(request, cancellation)
    }
}

impl<R, H> RequestHandler<R> for Box<H>
where
    R: Request,
    H: RequestHandler<R> + ?Sized,
{
    fn handle(
        &self,
        request: R,
        cancellation: CancellationToken,
    ) -> BoxFuture<'_, HandlerResult<R>> {
        (**self).handle(request, cancellation)
    }
}

/// Handler backed by an async closure.
///
/// Created by [`handler_fn`].
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap an async closure as a [`RequestHandler`].
///
/// # Example
///
/// ```
/// use mediator_core::{handler_fn, Outcome, Request, RequestHandler};
/// use tokio_util::sync::CancellationToken;
///
/// struct Ping;
/// impl Request for Ping {
///     type Output = Outcome<&'static str>;
/// }
///
/// let handler = handler_fn(|_: Ping, _| async { Ok(Outcome::success("pong")) });
/// # let outcome = tokio_test::block_on(handler.handle(Ping, CancellationToken::new())).ok();
/// # assert_eq!(outcome.and_then(Outcome::into_value), Some("pong"));
/// ```
pub const fn handler_fn<R, F, Fut>(f: F) -> HandlerFn<F>
where
    R: Request,
    F: Fn(R, CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult<R>> + Send + 'static,
{
    HandlerFn { f }
}

impl<R, F, Fut> RequestHandler<R> for HandlerFn<F>
where
    R: Request,
    F: Fn(R, CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult<R>> + Send + 'static,
{
    fn handle(
        &self,
        request: R,
        cancellation: CancellationToken,
    ) -> BoxFuture<'_, HandlerResult<R>> {
        Box::pin((self.f)(request, cancellation))
    }
}

/// Handler that builds a fresh inner handler for every request.
///
/// Gives a handler transient lifetime: no state survives between dispatches.
/// Registered with [`crate::HandlerRegistry::register_factory`].
pub struct FactoryHandler<F> {
    factory: F,
}

impl<F> FactoryHandler<F> {
    /// Wrap a handler factory
    pub const fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<R, F, H> RequestHandler<R> for FactoryHandler<F>
where
    R: Request,
    F: Fn() -> H + Send + Sync,
    H: RequestHandler<R> + 'static,
{
    fn handle(
        &self,
        request: R,
        cancellation: CancellationToken,
    ) -> BoxFuture<'_, HandlerResult<R>> {
        let handler = (self.factory)();
        Box::pin(async move { handler.handle(request, cancellation).await })
    }
}

/// Short type name of a request, used in logs and errors
#[must_use]
pub fn request_name<R: ?Sized>() -> &'static str {
    let full = std::any::type_name::<R>();
    // Keep generic arguments intact, strip the module path of the outer type.
    let outer = full.split('<').next().unwrap_or(full);
    match outer.rfind("::") {
        Some(index) => full.get(index + 2..).unwrap_or(full),
        None => full,
    }
}
