//! Greeting demo.
//!
//! A small set of requests wired through the Mediator:
//! - `GetGreeting`: plain outcome, validated, transient handler
//! - `ListItems`: HTTP outcome, closure handler
//! - `CreateUser`: HTTP outcome, rule and async validators, singleton handler

use mediator_core::{
    BoxFuture, CancellationToken, HandlerRegistry, HandlerResult, HttpOutcome, Mediator,
    MediatorConfig, MediatorError, Outcome, RequestHandler, StatusCode, ValidationError,
};
use mediator_macros::Request;
use mediator_validation::{
    RuleValidator, SharedValidator, ValidationExt, ValidationResult, Validator,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Greet someone by name
#[derive(Request, Debug, Clone)]
#[request(response = String)]
pub struct GetGreeting {
    /// Who to greet
    pub name: String,
}

/// List the catalogue items
#[derive(Request, Debug, Clone)]
#[request(http, response = Vec<String>)]
pub struct ListItems;

/// Register a new user
#[derive(Request, Debug, Clone)]
#[request(http, response = u64)]
pub struct CreateUser {
    /// Display name
    pub name: String,
    /// Contact address, must be unique
    pub email: String,
}

/// Builds a greeting; a new instance serves every request
#[derive(Debug, Default)]
pub struct GreetingHandler;

impl RequestHandler<GetGreeting> for GreetingHandler {
    fn handle(
        &self,
        request: GetGreeting,
        _cancellation: CancellationToken,
    ) -> BoxFuture<'_, HandlerResult<GetGreeting>> {
        Box::pin(async move { Ok(Outcome::success(format!("Hello {}", request.name))) })
    }
}

/// Hands out user ids
#[derive(Debug)]
pub struct UserHandler {
    next_id: AtomicU64,
}

impl UserHandler {
    /// Start numbering users at `first_id`
    #[must_use]
    pub const fn new(first_id: u64) -> Self {
        Self {
            next_id: AtomicU64::new(first_id),
        }
    }
}

impl RequestHandler<CreateUser> for UserHandler {
    fn handle(
        &self,
        request: CreateUser,
        _cancellation: CancellationToken,
    ) -> BoxFuture<'_, HandlerResult<CreateUser>> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        tracing::info!(id, name = %request.name, "Created user");
        Box::pin(async move { Ok(HttpOutcome::success_with_status(id, StatusCode::CREATED)) })
    }
}

/// Rejects e-mail addresses that are already taken
#[derive(Debug)]
pub struct UniqueEmailValidator {
    taken: HashSet<String>,
}

impl UniqueEmailValidator {
    /// Treat `taken` as already registered addresses, ignoring case
    #[must_use]
    pub fn new(taken: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            taken: taken
                .into_iter()
                .map(|email| Into::<String>::into(email).to_lowercase())
                .collect(),
        }
    }
}

impl Validator<CreateUser> for UniqueEmailValidator {
    fn validate<'a>(
        &'a self,
        request: &'a CreateUser,
        cancellation: &'a CancellationToken,
    ) -> BoxFuture<'a, ValidationResult> {
        Box::pin(async move {
            // Stands in for a database lookup.
            tokio::select! {
                () = cancellation.cancelled() => Err(MediatorError::Cancelled),
                () = tokio::task::yield_now() => {
                    if self.taken.contains(&request.email.to_lowercase()) {
                        Ok(vec![ValidationError::new(
                            "UniqueEmailValidator",
                            format!("'Email' {} is already registered.", request.email),
                            "Email",
                        )])
                    } else {
                        Ok(Vec::new())
                    }
                }
            }
        })
    }
}

fn create_user_rules() -> RuleValidator<CreateUser> {
    RuleValidator::new()
        .not_empty("Name", |request: &CreateUser| request.name.as_str())
        .max_length("Name", 50, |request: &CreateUser| request.name.as_str())
        .rule(
            "Email",
            "EmailValidator",
            "'Email' is not a valid email address.",
            |request: &CreateUser| request.email.contains('@'),
        )
}

/// Register every handler and validator of the demo
///
/// # Errors
///
/// Returns [`MediatorError::DuplicateHandler`] if the configuration rejects
/// duplicate registrations and a request type is registered twice.
pub fn build_mediator(config: MediatorConfig) -> Result<Mediator, MediatorError> {
    let mut registry = HandlerRegistry::with_config(config);

    registry
        .register_factory::<GetGreeting, _, _>(|| GreetingHandler)?
        .register_fn(|_: ListItems, _| async {
            Ok(HttpOutcome::ok(vec!["Test1".to_string(), "Test2".to_string()]))
        })?
        .register::<CreateUser, _>(UserHandler::new(1))?;

    registry.add_validator::<GetGreeting, _>(
        RuleValidator::new().not_empty("Name", |request: &GetGreeting| request.name.as_str()),
    );

    let user_validators: Vec<SharedValidator<CreateUser>> = vec![
        Arc::new(create_user_rules()),
        Arc::new(UniqueEmailValidator::new(["admin@example.com"])),
    ];
    registry.add_validation::<CreateUser>(user_validators);

    tracing::debug!(requests = ?registry.request_names(), "Mediator ready");
    Ok(Mediator::new(registry))
}
