//! Integration tests for cart store behavior.
//!
//! These tests drive a `CartStore` through operation sequences the way a
//! storefront UI would and check the cart's observable state afterwards.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use leafcart_cart::{CartError, CartEvent, CartStore};
use leafcart_core::CurrencyCode;
use leafcart_integration_tests::{dec, line};
use rust_decimal::Decimal;

// =============================================================================
// Totals
// =============================================================================

#[test]
fn test_total_is_idempotent() {
    let mut store = CartStore::new();
    store.add_item(line("p1", "3.99")).unwrap();
    store.add_item(line("p2", "0.01")).unwrap();

    let first = store.total_price();
    let second = store.total_price();
    assert_eq!(first, second);
    assert_eq!(store.total_items(), store.total_items());
}

#[test]
fn test_total_correctness() {
    let mut store = CartStore::new();
    store.add_item(line("p1", "2.50")).unwrap();
    store.update_quantity("p1", 3);
    store.add_item(line("p2", "10.00")).unwrap();

    assert_eq!(store.total_price(), dec("17.50"));
    assert_eq!(store.total_items(), 4);
    assert_eq!(store.summary(CurrencyCode::USD).total, "$17.50");
}

#[test]
fn test_many_small_prices_sum_exactly() {
    let mut store = CartStore::new();
    for i in 0..100 {
        store.add_item(line(&format!("p{i}"), "0.10")).unwrap();
    }
    assert_eq!(store.total_price(), dec("10.00"));
}

// =============================================================================
// Merging and identity
// =============================================================================

#[test]
fn test_merge_on_re_add() {
    let mut store = CartStore::new();
    store.add_item(line("A", "5.00")).unwrap();
    store.add_item(line("A", "5.00")).unwrap();

    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.first().map(|item| item.quantity), Some(2));
}

#[test]
fn test_price_immutable_on_merge() {
    let mut store = CartStore::new();
    store.add_item(line("p1", "10")).unwrap();
    store.add_item(line("p1", "999")).unwrap();

    let item = store.get("p1").unwrap();
    assert_eq!(item.unit_price.amount(), dec("10"));
    assert_eq!(store.total_price(), dec("20"));
}

#[test]
fn test_product_ids_stay_unique_across_operations() {
    let mut store = CartStore::new();
    for id in ["a", "b", "a", "c", "b", "a"] {
        store.add_item(line(id, "1")).unwrap();
    }
    store.remove_item("b");
    store.add_item(line("b", "1")).unwrap();

    let ids: Vec<String> = store
        .snapshot()
        .iter()
        .map(|item| item.product_id.to_string())
        .collect();
    assert_eq!(ids, vec!["a", "c", "b"]);
    assert_eq!(store.get("a").map(|item| item.quantity), Some(3));
    assert_eq!(store.get("b").map(|item| item.quantity), Some(1));
}

// =============================================================================
// Quantity floor and no-ops
// =============================================================================

#[test]
fn test_quantity_floor_removes_entry() {
    let mut store = CartStore::new();
    store.add_item(line("p1", "4")).unwrap();
    store.add_item(line("p2", "1")).unwrap();
    store.update_quantity("p1", 0);

    assert!(store.get("p1").is_none());
    assert_eq!(store.total_items(), 1);
}

#[test]
fn test_every_line_keeps_positive_quantity() {
    let mut store = CartStore::new();
    store.add_item(line("p1", "1")).unwrap();
    store.add_item(line("p2", "1")).unwrap();
    store.decrement("p1");
    store.update_quantity("p2", -1);
    store.add_item(line("p3", "1")).unwrap();
    store.decrement("p3");
    store.decrement("p3");

    assert!(store.snapshot().iter().all(|item| item.quantity >= 1));
    assert!(store.is_empty());
}

#[test]
fn test_removal_of_unknown_is_noop() {
    let mut store = CartStore::new();
    store.add_item(line("p1", "1")).unwrap();
    let before = store.snapshot();

    store.remove_item("nonexistent");
    store.update_quantity("nonexistent", 5);
    store.increment("nonexistent");
    store.decrement("nonexistent");

    assert_eq!(store.total_items(), 1);
    assert_eq!(store.snapshot(), before);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_invalid_add_is_all_or_nothing() {
    let mut store = CartStore::new();
    store.add_item(line("p1", "1")).unwrap();
    let before = store.snapshot();

    assert!(matches!(
        store.add_item(line("p2", "-0.01")),
        Err(CartError::InvalidArgument(_))
    ));
    assert!(matches!(
        store.add_item(line("  ", "1")),
        Err(CartError::InvalidArgument(_))
    ));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_free_items_are_allowed() {
    let mut store = CartStore::new();
    store.add_item(line("sample", "0")).unwrap();
    assert_eq!(store.total_price(), Decimal::ZERO);
    assert_eq!(store.total_items(), 1);
}

// =============================================================================
// Clear and snapshots
// =============================================================================

#[test]
fn test_clear_resets_fully() {
    let mut store = CartStore::new();
    store.add_item(line("p1", "1.25")).unwrap();
    store.add_item(line("p2", "8.75")).unwrap();
    store.clear();

    assert!(store.snapshot().is_empty());
    assert_eq!(store.total_price(), Decimal::ZERO);
    assert_eq!(store.total_items(), 0);
    assert!(store.summary(CurrencyCode::USD).is_empty());
}

#[test]
fn test_snapshot_survives_later_mutation() {
    let mut store = CartStore::new();
    store.add_item(line("p1", "2")).unwrap();
    let snapshot = store.snapshot();
    store.update_quantity("p1", 9);
    store.add_item(line("p2", "2")).unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.total_price(), dec("2"));
}

// =============================================================================
// Observers
// =============================================================================

#[test]
fn test_observer_renders_after_each_change() {
    let mut store = CartStore::new();
    let badge = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&badge);
    store.subscribe(move |_, items| {
        let count: u64 = items.iter().map(|item| u64::from(item.quantity)).sum();
        sink.borrow_mut().push(count);
    });

    store.add_item(line("p1", "1")).unwrap();
    store.add_item(line("p1", "1")).unwrap();
    store.add_item(line("p2", "1")).unwrap();
    store.update_quantity("p1", 5);
    store.remove_item("p2");
    store.remove_item("p2");
    store.clear();

    assert_eq!(*badge.borrow(), vec![1, 2, 3, 6, 5, 0]);
}

#[test]
fn test_multiple_observers_and_unsubscribe() {
    let mut store = CartStore::new();
    let events = Rc::new(RefCell::new(Vec::new()));

    let first = Rc::clone(&events);
    let first_id = store.subscribe(move |event, _| first.borrow_mut().push(("first", event.clone())));
    let second = Rc::clone(&events);
    store.subscribe(move |event, _| second.borrow_mut().push(("second", event.clone())));

    store.clear();
    assert!(store.unsubscribe(first_id));
    store.clear();

    let names: Vec<&str> = events.borrow().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["first", "second", "second"]);
    assert!(events.borrow().iter().all(|(_, event)| *event == CartEvent::Cleared));
}
