//! Integration tests for Leafcart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p leafcart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Behavior of the cart store across operation sequences
//! - `checkout_flow` - Two-phase checkout against an in-memory order service
//! - `catalog_to_cart` - Catalog records and purchase history through the cart
//!
//! This library holds the shared fixtures those tests use.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use leafcart_cart::{CheckoutError, OrderRequest, OrderService};
use leafcart_core::{CartLineInput, Purchase, PurchaseId, UserId};
use rust_decimal::Decimal;

/// Parse a decimal literal used in a test.
///
/// # Panics
///
/// Panics if `s` is not a decimal.
#[must_use]
pub fn dec(s: &str) -> Decimal {
    s.parse()
        .unwrap_or_else(|e| panic!("invalid decimal literal {s:?}: {e}"))
}

/// A line input with a generated name.
#[must_use]
pub fn line(product_id: &str, price: &str) -> CartLineInput {
    CartLineInput::new(product_id, format!("Product {product_id}"), dec(price))
}

/// How an [`InMemoryOrderService`] answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accept,
    Reject,
    Unavailable,
}

/// Order service that records requests and answers from a script of outcomes.
///
/// Once the script is exhausted every further call is accepted.
#[derive(Debug, Default)]
pub struct InMemoryOrderService {
    outcomes: Mutex<Vec<Outcome>>,
    requests: Mutex<Vec<OrderRequest>>,
}

impl InMemoryOrderService {
    /// A service that accepts every order.
    #[must_use]
    pub fn accepting() -> Self {
        Self::default()
    }

    /// A service that answers with `outcomes` in order.
    #[must_use]
    pub fn scripted(outcomes: &[Outcome]) -> Self {
        let mut outcomes = outcomes.to_vec();
        outcomes.reverse();
        Self {
            outcomes: Mutex::new(outcomes),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the request log lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn next_outcome(&self) -> Outcome {
        self.outcomes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop()
            .unwrap_or(Outcome::Accept)
    }
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    async fn finalize_order(&self, request: &OrderRequest) -> Result<Purchase, CheckoutError> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request.clone());

        match self.next_outcome() {
            Outcome::Accept => {
                let number = self.requests().len();
                Ok(Purchase {
                    id: PurchaseId::parse(format!("order-{number}"))
                        .map_err(|e| CheckoutError::InvalidResponse(e.to_string()))?,
                    user_id: UserId::parse("shopper")
                        .map_err(|e| CheckoutError::InvalidResponse(e.to_string()))?,
                    items: request.items.clone(),
                    total_amount: request.total_amount,
                    purchase_date: Utc::now(),
                })
            }
            Outcome::Reject => Err(CheckoutError::Rejected {
                status: 409,
                message: "item no longer available".to_string(),
            }),
            Outcome::Unavailable => Err(CheckoutError::Unavailable(
                "payment provider timeout".to_string(),
            )),
        }
    }
}
