//! CLI command implementations.

pub mod checkout;
pub mod history;
pub mod replay;
