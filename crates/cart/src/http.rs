//! HTTP order service.
//!
//! Posts the order request as JSON to the marketplace's purchases endpoint
//! and reads back the recorded purchase.

use async_trait::async_trait;
use leafcart_core::Purchase;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};
use url::Url;

use crate::checkout::{CheckoutError, OrderRequest, OrderService};
use crate::config::{ApiConfig, ConfigError};

/// Header carrying the per-attempt request ID.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Longest error body kept in [`CheckoutError::Rejected`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Errors that can occur when building an [`HttpOrderService`].
#[derive(Debug, thiserror::Error)]
pub enum HttpServiceError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// [`OrderService`] backed by the marketplace REST API.
pub struct HttpOrderService {
    client: reqwest::Client,
    endpoint: Url,
    token: Option<SecretString>,
}

impl std::fmt::Debug for HttpOrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpOrderService")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl HttpOrderService {
    /// Create a service from API configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL cannot be built or the HTTP
    /// client fails to initialize.
    pub fn new(config: &ApiConfig) -> Result<Self, HttpServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("leafcart/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.purchases_url()?,
            token: config.token.clone(),
        })
    }

    /// The URL orders are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl OrderService for HttpOrderService {
    #[instrument(skip(self, request), fields(request_id = %request.request_id, endpoint = %self.endpoint))]
    async fn finalize_order(&self, request: &OrderRequest) -> Result<Purchase, CheckoutError> {
        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header(IDEMPOTENCY_KEY_HEADER, request.request_id.to_string())
            .json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.expose_secret());
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "Order service responded");

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(error = %e, "Failed to read error response body");
                    String::new()
                }
            };
            return Err(rejection(status, &body));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<Purchase>(&body)
            .map_err(|e| CheckoutError::InvalidResponse(e.to_string()))
    }
}

/// Map a non-success response to a checkout error.
fn rejection(status: StatusCode, body: &str) -> CheckoutError {
    if status == StatusCode::SERVICE_UNAVAILABLE {
        return CheckoutError::Unavailable(truncate(body));
    }
    CheckoutError::Rejected {
        status: status.as_u16(),
        message: truncate(body),
    }
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push('…');
    cut
}
