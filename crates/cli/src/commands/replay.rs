//! Replay a cart script and print the resulting cart.
//!
//! # Usage
//!
//! ```bash
//! leafcart replay cart.yaml
//! leafcart replay cart.yaml --currency EUR --format json
//! ```

use std::path::Path;

use leafcart_cart::{CartStore, Config};
use leafcart_core::CurrencyCode;
use tracing::{debug, info, instrument};

use crate::error::CliError;
use crate::output::{self, OutputFormat};
use crate::script::Script;

/// Build a cart from a script, logging every change.
///
/// # Errors
///
/// Returns an error if the script cannot be loaded or a step is invalid.
pub async fn build_cart(path: &Path) -> Result<(Script, CartStore), CliError> {
    let script = Script::load(path).await?;
    info!(path = %path.display(), steps = script.steps.len(), "Loaded cart script");

    let mut store = CartStore::new();
    store.subscribe(|event, items| {
        debug!(?event, lines = items.len(), "Cart changed");
    });
    script.apply(&mut store)?;
    Ok((script, store))
}

/// Pick the display currency: command line, then script, then environment.
pub fn resolve_currency(
    flag: Option<CurrencyCode>,
    script: &Script,
    configured: CurrencyCode,
) -> CurrencyCode {
    flag.or(script.currency).unwrap_or(configured)
}

/// Replay a script and print the cart summary.
///
/// # Errors
///
/// Returns an error if the configured currency is invalid, or the script
/// cannot be loaded or applied. API settings are not read.
#[instrument(skip(format))]
pub async fn run(
    path: &Path,
    currency: Option<CurrencyCode>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let configured = Config::currency_from_env()?;
    let (script, store) = build_cart(path).await?;
    let currency = resolve_currency(currency, &script, configured);

    let summary = store.summary(currency);
    output::emit(format, &summary, || output::cart_text(&summary));
    Ok(())
}
