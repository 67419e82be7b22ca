//! Cart line items.
//!
//! [`CartLineInput`] is the unvalidated shape a caller hands to the cart when a
//! product is added; [`CartLineItem`] is the validated entry the cart holds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{IdError, ProductId};
use super::price::{Price, PriceError};

/// Errors that can occur when validating a [`CartLineInput`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineItemError {
    /// The product ID is empty.
    #[error("invalid product id: {0}")]
    ProductId(#[from] IdError),
    /// The unit price is negative.
    #[error("invalid unit price: {0}")]
    UnitPrice(#[from] PriceError),
}

/// A product as offered to the cart, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default)]
    pub seller_ref: String,
}

impl CartLineInput {
    /// Create a new line input with empty image and seller references.
    #[must_use]
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            image_ref: String::new(),
            seller_ref: String::new(),
        }
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    /// Set the seller reference.
    #[must_use]
    pub fn with_seller(mut self, seller_ref: impl Into<String>) -> Self {
        self.seller_ref = seller_ref.into();
        self
    }

    /// Validate the input into a cart entry with a quantity of one.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError`] if the product ID is empty or the unit price
    /// is negative.
    pub fn validate(self) -> Result<CartLineItem, LineItemError> {
        let product_id = ProductId::parse(self.product_id)?;
        let unit_price = Price::new(self.unit_price)?;
        Ok(CartLineItem {
            product_id,
            name: self.name,
            unit_price,
            image_ref: self.image_ref,
            seller_ref: self.seller_ref,
            quantity: 1,
        })
    }
}

/// One distinct product held in the cart.
///
/// `quantity` is always at least one while the entry is in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image_ref: String,
    pub seller_ref: String,
    pub quantity: u32,
}

impl CartLineItem {
    /// `unit_price * quantity`, exact.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.times(self.quantity)
    }
}
