//! Cart error types.
//!
//! No-op conditions (updating or removing a product that is not in the cart)
//! are not errors. Everything here leaves the cart exactly as it was.

use leafcart_core::LineItemError;
use thiserror::Error;

use crate::checkout::CheckoutError;

/// Errors surfaced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Malformed input to `add_item`.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] LineItemError),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// The order service did not finalize the order.
    #[error("Checkout failed: {0}")]
    CheckoutFailed(#[from] CheckoutError),
}

impl CartError {
    /// Whether retrying the same operation could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::CheckoutFailed(err) => err.is_retryable(),
            Self::InvalidArgument(_) | Self::EmptyCart => false,
        }
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
