//! Core types for Leafcart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod product;
pub mod purchase;

pub use id::*;
pub use line_item::{CartLineInput, CartLineItem, LineItemError};
pub use price::{CurrencyCode, Price, PriceError, round_for_display};
pub use product::{Product, SellerInfo};
pub use purchase::{Purchase, PurchaseItem, PurchaseStats};
