//! Shared error types

use thiserror::Error;

/// Errors raised while loading configuration or bootstrapping the process
///
/// Every variant is fatal: the process must not start when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The signing secret is absent or empty
    #[error("Signing secret is not configured (set {var})")]
    MissingSecret { var: String },

    /// A configuration value could not be parsed
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    /// The logging subscriber could not be installed
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}
