//! Change notification for cart observers.
//!
//! Observers are plain callbacks registered on a [`CartStore`](crate::CartStore).
//! They run synchronously after each mutation has completed, receiving the
//! event and the cart's items at that moment. A callback only ever sees a
//! shared slice of items, so it cannot mutate the store it observes.

use core::fmt;

use leafcart_core::{CartLineItem, ProductId};

/// What changed in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added, or an existing line was merged into.
    ItemAdded {
        product_id: ProductId,
        /// Quantity of the line after the add.
        quantity: u32,
    },
    /// A line's quantity was set.
    QuantityChanged { product_id: ProductId, quantity: u32 },
    /// A line was removed.
    ItemRemoved { product_id: ProductId },
    /// Every line was removed.
    Cleared,
}

impl CartEvent {
    /// The product this event concerns, if any.
    #[must_use]
    pub const fn product_id(&self) -> Option<&ProductId> {
        match self {
            Self::ItemAdded { product_id, .. }
            | Self::QuantityChanged { product_id, .. }
            | Self::ItemRemoved { product_id } => Some(product_id),
            Self::Cleared => None,
        }
    }
}

/// Handle returned by [`CartStore::subscribe`](crate::CartStore::subscribe),
/// used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Get the underlying u64 value.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Observer callback.
pub type Callback = Box<dyn FnMut(&CartEvent, &[CartLineItem])>;

/// Ordered list of registered observers.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: &CartEvent, items: &[CartLineItem]) {
        for (_, callback) in &mut self.entries {
            callback(event, items);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_ids_are_unique_after_unsubscribe() {
        let mut observers = Observers::default();
        let a = observers.subscribe(Box::new(|_, _| {}));
        assert!(observers.unsubscribe(a));
        let b = observers.subscribe(Box::new(|_, _| {}));
        assert_ne!(a, b);
    }

    #[test]
    fn test_unsubscribe_unknown_returns_false() {
        let mut observers = Observers::default();
        assert!(!observers.unsubscribe(SubscriptionId(7)));
    }

    #[test]
    fn test_notify_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::default();
        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            observers.subscribe(Box::new(move |_, _| log.borrow_mut().push(name)));
        }
        observers.notify(&CartEvent::Cleared, &[]);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_event_product_id() {
        assert!(CartEvent::Cleared.product_id().is_none());
        let Ok(id) = ProductId::parse("p1") else {
            panic!("valid id");
        };
        let event = CartEvent::ItemRemoved {
            product_id: id.clone(),
        };
        assert_eq!(event.product_id(), Some(&id));
    }
}
