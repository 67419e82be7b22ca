//! Leafcart Cart - In-memory shopping cart state.
//!
//! The cart is an explicitly constructed [`CartStore`], one per session,
//! passed by reference to whatever renders or mutates it. There is no global
//! cart.
//!
//! # Architecture
//!
//! - [`store`] - `CartStore`: add, update, remove, clear, totals, snapshots
//! - [`observer`] - Change events and subscriptions
//! - [`summary`] - Display view with amounts rounded for presentation
//! - [`checkout`] - Two-phase checkout against an `OrderService`
//! - [`http`] - `OrderService` over the marketplace REST API
//! - [`config`] - Environment configuration
//!
//! # Example
//!
//! ```rust
//! use leafcart_cart::CartStore;
//! use leafcart_core::{CartLineInput, CurrencyCode};
//! use rust_decimal::Decimal;
//!
//! let mut cart = CartStore::new();
//! cart.add_item(CartLineInput::new("p1", "Bamboo brush", Decimal::new(250, 2)))?;
//! cart.add_item(CartLineInput::new("p1", "Bamboo brush", Decimal::new(250, 2)))?;
//! cart.update_quantity("p1", 3);
//!
//! assert_eq!(cart.total_items(), 3);
//! assert_eq!(cart.summary(CurrencyCode::USD).total, "$7.50");
//! # Ok::<(), leafcart_cart::CartError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
pub mod http;
pub mod observer;
pub mod snapshot;
pub mod store;
pub mod summary;

pub use checkout::{CheckoutError, OrderRequest, OrderService, checkout};
pub use config::{ApiConfig, Config, ConfigError};
pub use error::{CartError, Result};
pub use http::{HttpOrderService, HttpServiceError};
pub use observer::{CartEvent, SubscriptionId};
pub use snapshot::CartSnapshot;
pub use store::CartStore;
pub use summary::{CartLineView, CartSummary};
