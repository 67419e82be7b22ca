//! The cart state store.
//!
//! [`CartStore`] owns the ordered, product-unique list of cart lines for one
//! session. Every mutation either completes and notifies observers, or is
//! rejected with the cart untouched.
//!
//! # Invariants
//!
//! - No two lines share a product ID; re-adding a product merges into its line.
//! - Every line has `quantity >= 1`; driving a quantity to zero removes the line.
//! - A line keeps the name, price, image and seller it was first added with.
//! - Lines stay in insertion order.

use leafcart_core::{CartLineInput, CartLineItem, CurrencyCode};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::error::{CartError, Result};
use crate::observer::{CartEvent, Observers, SubscriptionId};
use crate::snapshot::{self, CartSnapshot};
use crate::summary::CartSummary;

/// In-memory cart for a single session.
///
/// Construct one per session and pass it by reference to whatever needs it.
/// Mutations take `&mut self`, so an observer callback can never re-enter the
/// store while it is being notified.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<CartLineItem>,
    observers: Observers,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity goes up by one and
    /// the recorded name, price, image and seller are kept as they were.
    /// Otherwise a new line with quantity one is appended.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidArgument`] if the product ID is empty or the
    /// unit price is negative. The cart is unchanged in that case.
    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub fn add_item(&mut self, input: CartLineInput) -> Result<()> {
        let line = input.validate().map_err(CartError::InvalidArgument)?;
        let product_id = line.product_id.clone();

        let quantity = if let Some(existing) = self.find_mut(product_id.as_str()) {
            existing.quantity = existing.quantity.saturating_add(1);
            if existing.unit_price != line.unit_price {
                debug!(
                    kept = %existing.unit_price,
                    offered = %line.unit_price,
                    "Ignoring new price for product already in cart"
                );
            }
            existing.quantity
        } else {
            self.items.push(line);
            1
        };

        debug!(quantity, "Item added");
        self.notify(&CartEvent::ItemAdded {
            product_id,
            quantity,
        });
        Ok(())
    }

    /// Set a line's quantity.
    ///
    /// Unknown products are ignored. A quantity of zero or less removes the
    /// line. Quantities above `u32::MAX` are clamped.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: &str, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        let Some(line) = self.find_mut(product_id) else {
            debug!("Ignoring quantity update for product not in cart");
            return;
        };
        line.quantity = quantity;
        let event = CartEvent::QuantityChanged {
            product_id: line.product_id.clone(),
            quantity,
        };
        self.notify(&event);
    }

    /// Raise a line's quantity by one. Unknown products are ignored.
    pub fn increment(&mut self, product_id: &str) {
        if let Some(quantity) = self.quantity_of(product_id) {
            self.update_quantity(product_id, i64::from(quantity) + 1);
        }
    }

    /// Lower a line's quantity by one, removing it when it reaches zero.
    /// Unknown products are ignored.
    pub fn decrement(&mut self, product_id: &str) {
        if let Some(quantity) = self.quantity_of(product_id) {
            self.update_quantity(product_id, i64::from(quantity) - 1);
        }
    }

    /// Remove a line. Observers are only notified if a line was removed.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: &str) {
        let Some(index) = self.position(product_id) else {
            debug!("Ignoring removal of product not in cart");
            return;
        };
        let removed = self.items.remove(index);
        debug!("Item removed");
        self.notify(&CartEvent::ItemRemoved {
            product_id: removed.product_id,
        });
    }

    /// Remove every line. Always notifies observers.
    pub fn clear(&mut self) {
        let lines = self.items.len();
        self.items.clear();
        debug!(lines, "Cart cleared");
        self.notify(&CartEvent::Cleared);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of `unit_price * quantity` over all lines, exact and unrounded.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        snapshot::total_price(&self.items)
    }

    /// Sum of quantities over all lines (not the number of lines).
    #[must_use]
    pub fn total_items(&self) -> u64 {
        snapshot::total_items(&self.items)
    }

    /// A copy of the current lines in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(self.items.clone())
    }

    /// Borrow the current lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up a line by product ID.
    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&CartLineItem> {
        self.items
            .iter()
            .find(|item| item.product_id.as_str() == product_id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Presentation view of the cart in the given currency.
    #[must_use]
    pub fn summary(&self, currency: CurrencyCode) -> CartSummary {
        CartSummary::from_store(self, currency)
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Register a callback to run after every mutation.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent, &[CartLineItem]) + 'static,
    {
        let id = self.observers.subscribe(Box::new(callback));
        debug!(subscription = %id, "Observer subscribed");
        id
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, event: &CartEvent) {
        self.observers.notify(event, &self.items);
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id.as_str() == product_id)
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id.as_str() == product_id)
    }

    fn quantity_of(&self, product_id: &str) -> Option<u32> {
        self.get(product_id).map(|item| item.quantity)
    }
}
