//! The dispatch facade.
//!
//! [`Mediator`] is the single entry point callers use to send a request. It
//! resolves the handler registered for the request's type and returns the
//! handler's outcome unchanged.

use crate::error::MediatorError;
use crate::outcome::RequestOutcome;
use crate::registry::HandlerRegistry;
use crate::request::{HandlerResult, Request, request_name};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Routes each request to its handler.
///
/// Cloning a `Mediator` is cheap; all clones share one frozen registry.
///
/// # Example
///
/// ```
/// use mediator_core::{HandlerRegistry, Mediator, Outcome, Request};
///
/// struct GetGreeting(String);
///
/// impl Request for GetGreeting {
///     type Output = Outcome<String>;
/// }
///
/// # tokio_test::block_on(async {
/// let mut registry = HandlerRegistry::new();
/// registry
///     .register_fn(|request: GetGreeting, _| async move {
///         Ok(Outcome::success(format!("Hello {}", request.0)))
///     })
///     .ok();
///
/// let mediator = Mediator::new(registry);
/// let outcome = mediator.send(GetGreeting("test".to_string())).await.ok();
/// assert_eq!(outcome.and_then(Outcome::into_value).as_deref(), Some("Hello test"));
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct Mediator {
    registry: Arc<HandlerRegistry>,
}

impl Mediator {
    /// Freeze `registry` and build a mediator over it
    #[must_use]
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The registry this mediator dispatches through
    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Send a request with a token that is never cancelled
    ///
    /// # Errors
    ///
    /// See [`Mediator::send_with_cancellation`].
    pub async fn send<R: Request>(&self, request: R) -> HandlerResult<R> {
        self.send_with_cancellation(request, CancellationToken::new()).await
    }

    /// Send a request, propagating `cancellation` to the handler.
    ///
    /// The handler's outcome is returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`MediatorError::Cancelled`] if `cancellation` is already cancelled
    ///   (the handler is not invoked) or the handler observed cancellation
    /// - [`MediatorError::HandlerNotFound`] if no handler is registered for `R`
    /// - Any error the handler itself returns
    pub async fn send_with_cancellation<R: Request>(
        &self,
        request: R,
        cancellation: CancellationToken,
    ) -> HandlerResult<R> {
        let name = request_name::<R>();

        if cancellation.is_cancelled() {
            tracing::debug!(request = name, "Request cancelled before dispatch");
            return Err(MediatorError::Cancelled);
        }

        let handler = self.registry.resolve::<R>().inspect_err(|_| {
            tracing::warn!(request = name, "No handler registered");
        })?;

        let span = tracing::debug_span!("mediator_send", request = name);
        async move {
            let result = handler.handle(request, cancellation).await;
            match &result {
                Ok(outcome) => tracing::debug!(success = outcome.is_success(), "Request handled"),
                Err(error) => tracing::debug!(%error, "Request handler returned an error"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

impl From<HandlerRegistry> for Mediator {
    fn from(registry: HandlerRegistry) -> Self {
        Self::new(registry)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;

    struct Ping;

    impl Request for Ping {
        type Output = Outcome<&'static str>;
    }

    fn mediator() -> Mediator {
        let mut registry = HandlerRegistry::new();
        registry
            .register_fn(|_: Ping, _| async { Ok(Outcome::success("pong")) })
            .unwrap();
        Mediator::from(registry)
    }

    #[tokio::test]
    async fn clones_share_registry() {
        let mediator = mediator();
        let clone = mediator.clone();

        assert_eq!(clone.send(Ping).await.unwrap().into_value(), Some("pong"));
        assert_eq!(clone.registry().len(), mediator.registry().len());
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();

        let err = mediator().send_with_cancellation(Ping, token).await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
