//! Leafcart Core - Shared types library.
//!
//! This crate provides common types used across all Leafcart components:
//! - `cart` - The in-memory cart store, summaries and checkout
//! - `cli` - Command-line driver for replaying carts and reading history
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, line items,
//!   catalog products and purchases

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
