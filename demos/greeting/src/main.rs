//! Greeting demo binary
//!
//! Sends valid and invalid requests through the Mediator and logs the
//! outcomes. Configuration comes from `MEDIATOR_*` environment variables.

use greeting::{
    CreateUser, CreateUserDispatch, GetGreeting, GetGreetingDispatch, ListItems, ListItemsDispatch,
    build_mediator,
};
use mediator_core::{MediatorConfig, RequestOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn log_outcome(label: &str, outcome: &impl RequestOutcome) {
    if outcome.is_success() {
        tracing::info!(label, "Request succeeded");
        return;
    }
    for error in outcome.validation_errors() {
        tracing::warn!(
            label,
            property = error.property_name(),
            code = error.error_code(),
            "{}",
            error.error_message()
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "greeting=info,mediator_core=debug,mediator_validation=trace".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = MediatorConfig::from_env()?;
    tracing::info!(
        duplicate_handlers = %config.duplicate_handlers,
        validation = config.validation.enabled,
        "Loaded configuration"
    );
    let mediator = build_mediator(config)?;

    let greeting = mediator
        .get_greeting(GetGreeting {
            name: "test".to_string(),
        })
        .await?;
    log_outcome("greeting", &greeting);
    if let Some(text) = greeting.value() {
        tracing::info!("{text}");
    }

    let empty = mediator
        .get_greeting(GetGreeting {
            name: String::new(),
        })
        .await?;
    log_outcome("empty greeting", &empty);

    let items = mediator.list_items(ListItems).await?;
    tracing::info!(status = %items.status(), items = ?items.value(), "Listed items");

    let created = mediator
        .create_user(CreateUser {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
        .await?;
    tracing::info!(status = %created.status(), id = ?created.value(), "Create user");

    let rejected = mediator
        .create_user(CreateUser {
            name: String::new(),
            email: "admin@example.com".to_string(),
        })
        .await?;
    tracing::info!(status = %rejected.status(), "Create user");
    log_outcome("create user", &rejected);

    Ok(())
}
