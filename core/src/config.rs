//! Mediator configuration.
//!
//! Configuration is plain serde data with defaults for every field, so it can
//! be embedded in an application's own TOML file or read from the environment.
//!
//! ```toml
//! duplicate_handlers = "reject"
//!
//! [validation]
//! enabled = true
//! ```
//!
//! # Example
//!
//! ```
//! use mediator_core::config::{DuplicateHandlerPolicy, MediatorConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MediatorConfig::from_toml_str(r#"duplicate_handlers = "reject""#)?;
//! assert_eq!(config.duplicate_handlers, DuplicateHandlerPolicy::Reject);
//! assert!(config.validation.enabled);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Environment variable selecting the [`DuplicateHandlerPolicy`]
pub const DUPLICATE_HANDLERS_ENV: &str = "MEDIATOR_DUPLICATE_HANDLERS";

/// Environment variable enabling or disabling the validation layer
pub const VALIDATION_ENABLED_ENV: &str = "MEDIATOR_VALIDATION_ENABLED";

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse a configuration document
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting has an unsupported value
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue {
        /// Name of the setting or environment variable
        key: String,
        /// The rejected value
        value: String,
    },
}

/// What happens when a second handler is registered for the same request type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateHandlerPolicy {
    /// The new handler replaces the old one (a warning is logged)
    #[default]
    Replace,
    /// Registration fails with `MediatorError::DuplicateHandler`
    Reject,
}

impl DuplicateHandlerPolicy {
    /// Parse a policy name (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unknown names.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "reject" => Ok(Self::Reject),
            _ => Err(ConfigError::InvalidValue {
                key: DUPLICATE_HANDLERS_ENV.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for DuplicateHandlerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace => write!(f, "replace"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Validation layer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// When `false`, registering validators leaves handlers undecorated
    pub enabled: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Top-level mediator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediatorConfig {
    /// Policy for duplicate handler registrations
    pub duplicate_handlers: DuplicateHandlerPolicy,
    /// Validation layer settings
    pub validation: ValidationConfig,
}

impl MediatorConfig {
    /// Parse configuration from a TOML document; missing keys take defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not valid TOML or has
    /// values of the wrong type.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(document)?)
    }

    /// Load configuration from `MEDIATOR_*` environment variables
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to an
    /// unsupported value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// See [`MediatorConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(DUPLICATE_HANDLERS_ENV) {
            config.duplicate_handlers = DuplicateHandlerPolicy::parse(&value)?;
        }

        if let Some(value) = lookup(VALIDATION_ENABLED_ENV) {
            config.validation.enabled = parse_bool(VALIDATION_ENABLED_ENV, &value)?;
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
