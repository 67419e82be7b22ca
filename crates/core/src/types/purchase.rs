//! Completed purchases and purchase history statistics.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, PurchaseId, UserId};
use super::line_item::CartLineItem;
use super::price::Price;

/// One product line within a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Price,
    pub title: String,
}

impl PurchaseItem {
    /// `price * quantity`, exact.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}

impl From<&CartLineItem> for PurchaseItem {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            price: item.unit_price,
            title: item.name.clone(),
        }
    }
}

/// A completed order from the purchase history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: PurchaseId,
    pub user_id: UserId,
    pub items: Vec<PurchaseItem>,
    pub total_amount: Decimal,
    pub purchase_date: DateTime<Utc>,
}

impl Purchase {
    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Aggregate statistics over a purchase history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseStats {
    pub total_purchases: usize,
    pub total_spent: Decimal,
    pub total_items: u64,
}

impl PurchaseStats {
    /// Compute statistics from recorded purchase totals.
    ///
    /// `total_spent` sums each purchase's recorded `total_amount`, which is
    /// what the order service charged, rather than re-deriving it from lines.
    #[must_use]
    pub fn from_purchases(purchases: &[Purchase]) -> Self {
        purchases.iter().fold(Self::default(), |mut stats, purchase| {
            stats.total_purchases += 1;
            stats.total_spent = stats.total_spent.saturating_add(purchase.total_amount);
            stats.total_items += purchase.item_count();
            stats
        })
    }
}
