//! Integration tests for catalog records and purchase history.
//!
//! Catalog JSON is shaped like the marketplace's product endpoint; purchase
//! history like its purchases endpoint.

#![allow(clippy::unwrap_used)]

use leafcart_cart::{CartStore, checkout};
use leafcart_core::{CartLineInput, CurrencyCode, Product, Purchase, PurchaseStats};
use leafcart_integration_tests::{InMemoryOrderService, dec};

const CATALOG: &str = r#"[
    {
        "id": "p1",
        "title": "Bamboo toothbrush",
        "description": "Compostable handle",
        "category": "bathroom",
        "price": 3.49,
        "imageUrl": "/uploads/brush.jpg",
        "sellerId": "s1",
        "createdAt": "2024-02-10T09:00:00Z",
        "seller": { "username": "greenbathroom" }
    },
    {
        "id": "p2",
        "title": "Beeswax wraps",
        "description": "Set of three",
        "category": "kitchen",
        "price": "12.00",
        "imageUrl": "/uploads/wraps.jpg",
        "sellerId": "s2",
        "createdAt": "2024-02-11T09:00:00Z"
    }
]"#;

fn catalog() -> Vec<Product> {
    serde_json::from_str(CATALOG).unwrap()
}

// =============================================================================
// Catalog to cart
// =============================================================================

#[test]
fn test_products_become_cart_lines() {
    let mut store = CartStore::new();
    for product in &catalog() {
        store.add_item(CartLineInput::from(product)).unwrap();
    }

    let brush = store.get("p1").unwrap();
    assert_eq!(brush.name, "Bamboo toothbrush");
    assert_eq!(brush.seller_ref, "greenbathroom");
    assert_eq!(brush.image_ref, "/uploads/brush.jpg");

    let wraps = store.get("p2").unwrap();
    assert_eq!(wraps.seller_ref, "s2");
    assert_eq!(store.total_price(), dec("15.49"));
}

#[test]
fn test_repriced_listing_does_not_change_cart_line() {
    let mut store = CartStore::new();
    let mut products = catalog();
    let brush = products.first_mut().unwrap();
    store.add_item(CartLineInput::from(&*brush)).unwrap();

    brush.price = leafcart_core::Price::new(dec("99.00")).unwrap();
    brush.title = "Bamboo toothbrush (premium)".to_string();
    store.add_item(CartLineInput::from(&*brush)).unwrap();

    let line = store.get("p1").unwrap();
    assert_eq!(line.quantity, 2);
    assert_eq!(line.unit_price.amount(), dec("3.49"));
    assert_eq!(line.name, "Bamboo toothbrush");
    assert_eq!(store.summary(CurrencyCode::USD).subtotal, "$6.98");
}

#[test]
fn test_negative_catalog_price_is_rejected_on_parse() {
    let json = r#"{
        "id": "p9", "title": "Broken", "price": -1,
        "sellerId": "s1", "createdAt": "2024-02-10T09:00:00Z"
    }"#;
    assert!(serde_json::from_str::<Product>(json).is_err());
}

// =============================================================================
// Checkout into purchase history
// =============================================================================

#[tokio::test]
async fn test_completed_checkouts_feed_purchase_stats() {
    let service = InMemoryOrderService::accepting();
    let mut history: Vec<Purchase> = Vec::new();

    let mut store = CartStore::new();
    for product in &catalog() {
        store.add_item(CartLineInput::from(product)).unwrap();
    }
    history.push(checkout(&mut store, &service).await.unwrap());

    store.add_item(CartLineInput::from(catalog().last().unwrap())).unwrap();
    store.increment("p2");
    history.push(checkout(&mut store, &service).await.unwrap());

    let stats = PurchaseStats::from_purchases(&history);
    assert_eq!(stats.total_purchases, 2);
    assert_eq!(stats.total_items, 4);
    assert_eq!(stats.total_spent, dec("39.49"));
}

#[test]
fn test_purchase_serializes_for_history_endpoint() {
    let json = r#"{
        "id": "o1",
        "userId": "u1",
        "items": [{"productId": "p1", "quantity": 2, "price": "3.49", "title": "Bamboo toothbrush"}],
        "totalAmount": "6.98",
        "purchaseDate": "2024-03-01T12:00:00Z"
    }"#;
    let purchase: Purchase = serde_json::from_str(json).unwrap();
    let value = serde_json::to_value(&purchase).unwrap();
    assert_eq!(value["items"][0]["productId"], "p1");
    assert_eq!(value["totalAmount"], "6.98");
}
