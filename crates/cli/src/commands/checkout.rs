//! Replay a cart script and check it out against the marketplace API.
//!
//! # Usage
//!
//! ```bash
//! LEAFCART_API_BASE_URL=https://market.example.test leafcart checkout cart.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `LEAFCART_API_BASE_URL` - Base URL of the marketplace API (required)
//! - `LEAFCART_API_TOKEN` - Bearer token for order requests
//! - `LEAFCART_CHECKOUT_TIMEOUT_SECS` - Request timeout (default: 30)

use std::path::Path;

use leafcart_cart::{Config, HttpOrderService, checkout};
use leafcart_core::CurrencyCode;
use tracing::{error, info, instrument};

use crate::error::CliError;
use crate::output::{self, OutputFormat};

use super::replay::{build_cart, resolve_currency};

/// Replay a script, then finalize the order.
///
/// On failure the cart that was submitted is printed so the attempt can be
/// inspected and retried.
///
/// # Errors
///
/// Returns an error if configuration is missing, the script is invalid, or
/// the order service does not finalize the order.
#[instrument(skip(format))]
pub async fn run(
    path: &Path,
    currency: Option<CurrencyCode>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = Config::from_env()?;
    let api = config.require_api()?;
    let service = HttpOrderService::new(api)?;
    info!(endpoint = %service.endpoint(), "Order service configured");

    let (script, mut store) = build_cart(path).await?;
    let currency = resolve_currency(currency, &script, config.currency);

    match checkout(&mut store, &service).await {
        Ok(purchase) => {
            output::emit(format, &purchase, || {
                output::purchase_text(&purchase, currency)
            });
            Ok(())
        }
        Err(e) => {
            error!(retryable = e.is_retryable(), "Checkout failed: {e}");
            let summary = store.summary(currency);
            output::emit(format, &summary, || output::cart_text(&summary));
            Err(e.into())
        }
    }
}
