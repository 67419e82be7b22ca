//! Point-in-time copies of cart contents.

use core::ops::Deref;

use leafcart_core::CartLineItem;
use rust_decimal::Decimal;
use serde::Serialize;

/// A read-only copy of the cart's lines in insertion order.
///
/// Holding a snapshot never affects the store it was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct CartSnapshot(Vec<CartLineItem>);

impl CartSnapshot {
    pub(crate) const fn new(items: Vec<CartLineItem>) -> Self {
        Self(items)
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        total_price(&self.0)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        total_items(&self.0)
    }

    /// Consume the snapshot and return its lines.
    #[must_use]
    pub fn into_vec(self) -> Vec<CartLineItem> {
        self.0
    }
}

impl Deref for CartSnapshot {
    type Target = [CartLineItem];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a CartSnapshot {
    type Item = &'a CartLineItem;
    type IntoIter = core::slice::Iter<'a, CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Exact total of a set of lines. Never rounds.
pub(crate) fn total_price(items: &[CartLineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
}

pub(crate) fn total_items(items: &[CartLineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}
