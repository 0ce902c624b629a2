//! Handler registry keyed by request type.
//!
//! The registry provides:
//! - One handler per request type, looked up by the request's `TypeId`
//! - Singleton, closure and transient (factory) registrations
//! - Try-decoration of a registered handler (used by the validation layer)
//! - Introspection of registered request types
//!
//! A registry is built mutably at startup and then frozen behind the
//! [`crate::Mediator`]'s `Arc`.

use crate::config::{DuplicateHandlerPolicy, MediatorConfig};
use crate::error::MediatorError;
use crate::request::{
    FactoryHandler, HandlerFn, HandlerResult, Request, RequestHandler, request_name,
};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Shared, type-erased handle to the handler for request `R`
pub type SharedHandler<R> = Arc<dyn RequestHandler<R>>;

/// A registered handler with its request name
struct HandlerEntry {
    /// Type name of the request (for logs and introspection)
    request: &'static str,
    /// Always a `SharedHandler<R>` for the `R` whose `TypeId` keys this entry
    handler: Box<dyn Any + Send + Sync>,
}

/// Lookup table from request type to its single handler.
///
/// ## Example
///
/// ```
/// use mediator_core::{HandlerRegistry, Outcome, Request};
///
/// struct GetGreeting(String);
///
/// impl Request for GetGreeting {
///     type Output = Outcome<String>;
/// }
///
/// let mut registry = HandlerRegistry::new();
/// registry
///     .register_fn(|request: GetGreeting, _| async move {
///         Ok(Outcome::success(format!("Hello {}", request.0)))
///     })
///     .ok();
///
/// assert!(registry.contains::<GetGreeting>());
/// assert_eq!(registry.request_names(), vec!["GetGreeting"]);
/// ```
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<TypeId, HandlerEntry>,
    config: MediatorConfig,
}

impl HandlerRegistry {
    /// Create an empty registry with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given configuration
    #[must_use]
    pub fn with_config(config: MediatorConfig) -> Self {
        Self {
            handlers: HashMap::new(),
            config,
        }
    }

    /// The configuration this registry was built with
    #[must_use]
    pub const fn config(&self) -> &MediatorConfig {
        &self.config
    }

    /// Register the handler for request type `R`.
    ///
    /// The same handler instance serves every dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`MediatorError::DuplicateHandler`] if a handler for `R` already
    /// exists and the configuration rejects duplicates. With the default
    /// [`DuplicateHandlerPolicy::Replace`] the previous handler is replaced.
    pub fn register<R, H>(&mut self, handler: H) -> Result<&mut Self, MediatorError>
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        self.insert::<R>(Arc::new(handler))
    }

    /// Register an async closure as the handler for request type `R`
    ///
    /// # Errors
    ///
    /// See [`HandlerRegistry::register`].
    pub fn register_fn<R, F, Fut>(&mut self, f: F) -> Result<&mut Self, MediatorError>
    where
        R: Request,
        F: Fn(R, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult<R>> + Send + 'static,
    {
        self.register::<R, HandlerFn<F>>(crate::request::handler_fn(f))
    }

    /// Register a factory building a fresh handler for every dispatch of `R`
    ///
    /// # Errors
    ///
    /// See [`HandlerRegistry::register`].
    pub fn register_factory<R, F, H>(&mut self, factory: F) -> Result<&mut Self, MediatorError>
    where
        R: Request,
        F: Fn() -> H + Send + Sync + 'static,
        H: RequestHandler<R> + 'static,
    {
        self.register::<R, FactoryHandler<F>>(FactoryHandler::new(factory))
    }

    fn insert<R: Request>(
        &mut self,
        handler: SharedHandler<R>,
    ) -> Result<&mut Self, MediatorError> {
        let request = request_name::<R>();
        let key = TypeId::of::<R>();

        if self.handlers.contains_key(&key) {
            match self.config.duplicate_handlers {
                DuplicateHandlerPolicy::Reject => {
                    tracing::warn!(request, "Rejected duplicate handler registration");
                    return Err(MediatorError::DuplicateHandler { request });
                }
                DuplicateHandlerPolicy::Replace => {
                    tracing::warn!(request, "Replacing previously registered handler");
                }
            }
        }

        self.handlers.insert(
            key,
            HandlerEntry {
                request,
                handler: Box::new(handler),
            },
        );
        tracing::debug!(request, "Registered request handler");
        Ok(self)
    }

    /// Wrap the handler registered for `R`.
    ///
    /// `decorate` receives the current handler and returns its replacement.
    /// Does nothing and returns `false` when no handler is registered for `R`.
    pub fn decorate<R, F>(&mut self, decorate: F) -> bool
    where
        R: Request,
        F: FnOnce(SharedHandler<R>) -> SharedHandler<R>,
    {
        let Some(entry) = self.handlers.get_mut(&TypeId::of::<R>()) else {
            tracing::debug!(request = request_name::<R>(), "No handler to decorate");
            return false;
        };

        let Some(current) = entry.handler.downcast_ref::<SharedHandler<R>>() else {
            return false;
        };

        let decorated = decorate(Arc::clone(current));
        entry.handler = Box::new(decorated);
        tracing::debug!(request = entry.request, "Decorated request handler");
        true
    }

    /// Resolve the handler for request type `R`
    ///
    /// # Errors
    ///
    /// Returns [`MediatorError::HandlerNotFound`] if no handler is registered.
    pub fn resolve<R: Request>(&self) -> Result<SharedHandler<R>, MediatorError> {
        self.handlers
            .get(&TypeId::of::<R>())
            .and_then(|entry| entry.handler.downcast_ref::<SharedHandler<R>>())
            .cloned()
            .ok_or(MediatorError::HandlerNotFound {
                request: request_name::<R>(),
            })
    }

    /// Check if a handler is registered for `R`
    #[must_use]
    pub fn contains<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    /// Number of registered request types
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handler is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Names of all registered request types, sorted alphabetically
    #[must_use]
    pub fn request_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.handlers.values().map(|entry| entry.request).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("requests", &self.request_names())
            .field("config", &self.config)
            .finish()
    }
}
