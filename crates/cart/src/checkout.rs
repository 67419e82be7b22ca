//! Two-phase checkout.
//!
//! 1. The cart contents are sent to an [`OrderService`] to finalize the order.
//!    This call may take arbitrarily long and may fail.
//! 2. Only when it succeeds is the cart cleared.
//!
//! A failed finalize leaves the cart exactly as it was so the caller can retry.

use async_trait::async_trait;
use leafcart_core::{Purchase, PurchaseItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{CartError, Result};
use crate::snapshot::CartSnapshot;
use crate::store::CartStore;

/// Errors returned by an [`OrderService`].
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// HTTP request failed before a response arrived (includes timeouts).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The order service answered with a non-success status.
    #[error("Order rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// The order service answered with a body that is not a purchase.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The order service could not be reached or is not accepting orders.
    #[error("Order service unavailable: {0}")]
    Unavailable(String),
}

impl CheckoutError {
    /// Whether the same request could succeed if sent again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Unavailable(_) => true,
            Self::Rejected { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidResponse(_) => false,
        }
    }
}

/// Finalize-order request built from the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Unique per checkout attempt; sent as the idempotency key.
    pub request_id: Uuid,
    pub items: Vec<PurchaseItem>,
    pub total_amount: Decimal,
}

impl OrderRequest {
    /// Build a request from a cart snapshot with a fresh request ID.
    #[must_use]
    pub fn from_snapshot(snapshot: &CartSnapshot) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            items: snapshot.iter().map(PurchaseItem::from).collect(),
            total_amount: snapshot.total_price(),
        }
    }
}

/// External service that turns a cart into a completed purchase.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Finalize the order and return the recorded purchase.
    async fn finalize_order(&self, request: &OrderRequest)
    -> std::result::Result<Purchase, CheckoutError>;
}

/// Check out the cart.
///
/// On success the cart is cleared and the purchase returned.
///
/// # Errors
///
/// - [`CartError::EmptyCart`] if there is nothing to buy; the service is not
///   called.
/// - [`CartError::CheckoutFailed`] if the service fails; the cart is unchanged.
#[instrument(
    skip(store, service),
    fields(lines = store.len(), items = store.total_items(), total = %store.total_price())
)]
pub async fn checkout<S>(store: &mut CartStore, service: &S) -> Result<Purchase>
where
    S: OrderService + ?Sized,
{
    if store.is_empty() {
        return Err(CartError::EmptyCart);
    }

    let request = OrderRequest::from_snapshot(&store.snapshot());

    match service.finalize_order(&request).await {
        Ok(purchase) => {
            info!(
                request_id = %request.request_id,
                purchase_id = %purchase.id,
                "Order finalized"
            );
            store.clear();
            Ok(purchase)
        }
        Err(e) => {
            warn!(
                request_id = %request.request_id,
                retryable = e.is_retryable(),
                "Failed to finalize order: {e}"
            );
            Err(CartError::CheckoutFailed(e))
        }
    }
}
