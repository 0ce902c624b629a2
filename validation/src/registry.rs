//! Registering validation on a [`HandlerRegistry`].

use crate::decorator::{SharedValidator, ValidationDecorator};
use crate::validator::Validator;
use mediator_core::{FromValidationErrors, HandlerRegistry, Request, SharedHandler, request_name};
use std::sync::Arc;

/// Adds the validation layer to registered handlers.
///
/// # Example
///
/// ```
/// use mediator_core::{HandlerRegistry, Outcome, Request};
/// use mediator_validation::{RuleValidator, ValidationExt};
///
/// struct CreateUser {
///     name: String,
/// }
///
/// impl Request for CreateUser {
///     type Output = Outcome<String>;
/// }
///
/// let mut registry = HandlerRegistry::new();
/// registry
///     .register_fn(|request: CreateUser, _| async move { Ok(Outcome::success(request.name)) })
///     .ok();
///
/// let decorated = registry.add_validator::<CreateUser, _>(
///     RuleValidator::new().not_empty("Name", |request: &CreateUser| request.name.as_str()),
/// );
/// assert!(decorated);
/// ```
pub trait ValidationExt {
    /// Wrap the handler registered for `R` in a [`ValidationDecorator`].
    ///
    /// Does nothing and returns `false` when no handler is registered for
    /// `R` or validation is disabled in the registry's configuration.
    /// Calling this again wraps the decorated handler once more; the
    /// outermost validators run first.
    fn add_validation<R>(&mut self, validators: Vec<SharedValidator<R>>) -> bool
    where
        R: Request + Sync,
        R::Output: FromValidationErrors;

    /// Shorthand for [`ValidationExt::add_validation`] with one validator
    fn add_validator<R, V>(&mut self, validator: V) -> bool
    where
        R: Request + Sync,
        R::Output: FromValidationErrors,
        V: Validator<R> + 'static,
    {
        let validator: SharedValidator<R> = Arc::new(validator);
        self.add_validation::<R>(vec![validator])
    }
}

impl ValidationExt for HandlerRegistry {
    fn add_validation<R>(&mut self, validators: Vec<SharedValidator<R>>) -> bool
    where
        R: Request + Sync,
        R::Output: FromValidationErrors,
    {
        if !self.config().validation.enabled {
            tracing::debug!(
                request = request_name::<R>(),
                "Validation disabled, handler left undecorated"
            );
            return false;
        }

        let count = validators.len();
        let decorated = self.decorate::<R, _>(move |inner| -> SharedHandler<R> {
            Arc::new(ValidationDecorator::new(inner, validators))
        });

        if decorated {
            tracing::debug!(
                request = request_name::<R>(),
                validators = count,
                "Validation added"
            );
        }
        decorated
    }
}
