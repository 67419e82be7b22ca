//! CLI error type.

use leafcart_cart::{CartError, ConfigError, HttpServiceError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A script is not valid YAML or has an unknown step.
    #[error("Invalid script: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A purchase history file is not valid JSON.
    #[error("Invalid purchase history: {0}")]
    Json(#[from] serde_json::Error),

    /// A script step was rejected by the cart.
    #[error("Step {step} rejected: {source}")]
    Step {
        step: usize,
        #[source]
        source: CartError,
    },

    /// A script step carries a quantity that is not a whole number.
    #[error("Step {step}: quantity '{value}' is not a whole number")]
    InvalidQuantity { step: usize, value: String },

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The order service client could not be built.
    #[error("Order service error: {0}")]
    Service(#[from] HttpServiceError),

    /// Checkout did not complete.
    #[error(transparent)]
    Cart(#[from] CartError),
}
