//! Presentation view of a cart.
//!
//! Amounts are rounded to cents here and only here; the store itself keeps
//! exact totals.

use leafcart_core::{CartLineItem, CurrencyCode};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::snapshot;
use crate::store::CartStore;

/// Label shown for shipping. Shipping is not charged.
pub const FREE_SHIPPING: &str = "Free";

/// One cart line, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub image_ref: String,
    pub seller_ref: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl CartLineView {
    fn new(item: &CartLineItem, currency: CurrencyCode) -> Self {
        Self {
            product_id: item.product_id.as_str().to_owned(),
            name: item.name.clone(),
            image_ref: item.image_ref.clone(),
            seller_ref: item.seller_ref.clone(),
            quantity: item.quantity,
            price: currency.format(item.unit_price.amount()),
            line_price: currency.format(item.line_total()),
        }
    }
}

/// Cart display data: lines plus the order summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLineView>,
    /// Total units across lines.
    pub item_count: u64,
    /// Number of distinct lines.
    pub line_count: usize,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
    pub currency: CurrencyCode,
}

impl CartSummary {
    /// Create an empty cart summary.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self::from_items(&[], currency)
    }

    /// Build a summary of the store's current lines.
    #[must_use]
    pub fn from_store(store: &CartStore, currency: CurrencyCode) -> Self {
        Self::from_items(store.items(), currency)
    }

    fn from_items(items: &[CartLineItem], currency: CurrencyCode) -> Self {
        let subtotal = snapshot::total_price(items);
        // No tax is collected at checkout.
        let tax = Decimal::ZERO;

        Self {
            lines: items
                .iter()
                .map(|item| CartLineView::new(item, currency))
                .collect(),
            item_count: snapshot::total_items(items),
            line_count: items.len(),
            subtotal: currency.format(subtotal),
            shipping: FREE_SHIPPING.to_string(),
            tax: currency.format(tax),
            total: currency.format(subtotal.saturating_add(tax)),
            currency,
        }
    }

    /// Whether the summary has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
