//! Leafcart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required for checkout
//! - `LEAFCART_API_BASE_URL` - Base URL of the marketplace API
//!
//! ## Optional
//! - `LEAFCART_API_TOKEN` - Bearer token sent with order requests
//! - `LEAFCART_CURRENCY` - Display currency (default: USD)
//! - `LEAFCART_CHECKOUT_TIMEOUT_SECS` - Order request timeout (default: 30)

use std::time::Duration;

use leafcart_core::CurrencyCode;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const API_BASE_URL_VAR: &str = "LEAFCART_API_BASE_URL";
const API_TOKEN_VAR: &str = "LEAFCART_API_TOKEN";
const CURRENCY_VAR: &str = "LEAFCART_CURRENCY";
const TIMEOUT_VAR: &str = "LEAFCART_CHECKOUT_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path of the purchases endpoint, relative to the API base URL.
const PURCHASES_PATH: &str = "api/purchases";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Leafcart configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Currency used when formatting amounts
    pub currency: CurrencyCode,
    /// Order API settings, present when `LEAFCART_API_BASE_URL` is set
    pub api: Option<ApiConfig>,
}

/// Marketplace order API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL of the marketplace API
    pub base_url: Url,
    /// Bearer token for order requests
    pub token: Option<SecretString>,
    /// Request timeout for finalizing an order
    pub timeout: Duration,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let currency = Self::currency_from_lookup(&lookup)?;

        let api = match lookup(API_BASE_URL_VAR) {
            Some(base_url) => Some(ApiConfig::from_lookup(&base_url, &lookup)?),
            None => None,
        };

        Ok(Self { currency, api })
    }

    /// Load only the display currency from environment variables.
    ///
    /// Commands that never talk to the order API use this so that a broken
    /// API setting does not stop them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `LEAFCART_CURRENCY` is not a
    /// supported currency.
    pub fn currency_from_env() -> Result<CurrencyCode, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::currency_from_lookup(|key| std::env::var(key).ok())
    }

    /// Load only the display currency through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the currency is set but invalid.
    pub fn currency_from_lookup<F>(lookup: F) -> Result<CurrencyCode, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(lookup(CURRENCY_VAR)
            .map(|value| {
                value
                    .parse::<CurrencyCode>()
                    .map_err(|e| ConfigError::InvalidEnvVar(CURRENCY_VAR.to_string(), e))
            })
            .transpose()?
            .unwrap_or_default())
    }

    /// The order API settings, or an error naming the missing variable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if no API base URL was configured.
    pub fn require_api(&self) -> Result<&ApiConfig, ConfigError> {
        self.api
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar(API_BASE_URL_VAR.to_string()))
    }
}

impl ApiConfig {
    fn from_lookup<F>(base_url: &str, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidEnvVar(API_BASE_URL_VAR.to_string(), e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                API_BASE_URL_VAR.to_string(),
                format!("unsupported scheme '{}'", base_url.scheme()),
            ));
        }

        let token = lookup(API_TOKEN_VAR)
            .filter(|value| !value.is_empty())
            .map(SecretString::from);
        if let Some(token) = &token {
            validate_token(token, API_TOKEN_VAR)?;
        }

        let timeout_secs = lookup(TIMEOUT_VAR)
            .map(|value| {
                value
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidEnvVar(TIMEOUT_VAR.to_string(), e.to_string()))
            })
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                TIMEOUT_VAR.to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// URL of the purchases endpoint.
    ///
    /// The base URL is treated as a directory, so `https://host/shop` and
    /// `https://host/shop/` both resolve to `https://host/shop/api/purchases`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the joined URL is invalid.
    pub fn purchases_url(&self) -> Result<Url, ConfigError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(PURCHASES_PATH)
            .map_err(|e| ConfigError::InvalidEnvVar(API_BASE_URL_VAR.to_string(), e.to_string()))
    }
}

/// Reject tokens that are obviously copied from a template.
fn validate_token(token: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let lower = token.expose_secret().to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InvalidEnvVar(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_api() {
        let config = load(&[]).unwrap();
        assert_eq!(config.currency, CurrencyCode::USD);
        assert!(config.api.is_none());
        assert!(matches!(
            config.require_api(),
            Err(ConfigError::MissingEnvVar(var)) if var == "LEAFCART_API_BASE_URL"
        ));
    }

    #[test]
    fn test_full_config() {
        let config = load(&[
            ("LEAFCART_API_BASE_URL", "https://market.test"),
            ("LEAFCART_API_TOKEN", "tk_9fQ2mZ81LpX"),
            ("LEAFCART_CURRENCY", "gbp"),
            ("LEAFCART_CHECKOUT_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.currency, CurrencyCode::GBP);
        let api = config.require_api().unwrap();
        assert_eq!(api.timeout, Duration::from_secs(5));
        assert!(api.token.is_some());
    }

    #[test]
    fn test_invalid_currency() {
        let err = load(&[("LEAFCART_CURRENCY", "doubloons")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(var, _) if var == "LEAFCART_CURRENCY"));
    }

    #[test]
    fn test_currency_ignores_broken_api_settings() {
        let vars: HashMap<&str, &str> = [
            ("LEAFCART_API_BASE_URL", "not a url"),
            ("LEAFCART_API_TOKEN", "your-token-here"),
            ("LEAFCART_CURRENCY", "cad"),
        ]
        .into_iter()
        .collect();
        let lookup = |key: &str| vars.get(key).map(|v| (*v).to_string());

        assert!(Config::from_lookup(lookup).is_err());
        assert_eq!(Config::currency_from_lookup(lookup).unwrap(), CurrencyCode::CAD);
        assert_eq!(
            Config::currency_from_lookup(|_| None).unwrap(),
            CurrencyCode::USD
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(load(&[("LEAFCART_API_BASE_URL", "not a url")]).is_err());
        assert!(load(&[("LEAFCART_API_BASE_URL", "ftp://market.test")]).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = load(&[
            ("LEAFCART_API_BASE_URL", "https://market.test"),
            ("LEAFCART_CHECKOUT_TIMEOUT_SECS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_placeholder_token_rejected() {
        let err = load(&[
            ("LEAFCART_API_BASE_URL", "https://market.test"),
            ("LEAFCART_API_TOKEN", "your-token-here"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(var, _) if var == "LEAFCART_API_TOKEN"));
    }

    #[test]
    fn test_purchases_url_joins_as_directory() {
        for base in ["https://market.test/shop", "https://market.test/shop/"] {
            let config = load(&[("LEAFCART_API_BASE_URL", base)]).unwrap();
            let url = config.require_api().unwrap().purchases_url().unwrap();
            assert_eq!(url.as_str(), "https://market.test/shop/api/purchases");
        }
        let config = load(&[("LEAFCART_API_BASE_URL", "http://localhost:5000")]).unwrap();
        let url = config.require_api().unwrap().purchases_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/purchases");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = load(&[
            ("LEAFCART_API_BASE_URL", "https://market.test"),
            ("LEAFCART_API_TOKEN", "tk_9fQ2mZ81LpX"),
        ])
        .unwrap();
        let debug = format!("{:?}", config.require_api().unwrap());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("tk_9fQ2mZ81LpX"));
    }
}
