//! Purchase history statistics.
//!
//! # Usage
//!
//! ```bash
//! leafcart history purchases.json
//! ```
//!
//! The file holds a JSON array of purchases as returned by the marketplace's
//! purchase history endpoint.

use std::path::Path;

use leafcart_cart::Config;
use leafcart_core::{CurrencyCode, Purchase, PurchaseStats};
use tracing::{info, instrument};

use crate::error::CliError;
use crate::output::{self, OutputFormat};

/// Parse a purchase history document.
///
/// # Errors
///
/// Returns `CliError::Json` if the document is not a list of purchases.
pub fn parse_history(content: &str) -> Result<Vec<Purchase>, CliError> {
    Ok(serde_json::from_str(content)?)
}

/// Print statistics for a purchase history file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
#[instrument(skip(format))]
pub async fn run(
    path: &Path,
    currency: Option<CurrencyCode>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let currency = match currency {
        Some(currency) => currency,
        None => Config::currency_from_env()?,
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        })?;
    let purchases = parse_history(&content)?;
    info!(purchases = purchases.len(), "Loaded purchase history");

    let stats = PurchaseStats::from_purchases(&purchases);
    output::emit(format, &stats, || output::stats_text(&stats, currency));
    Ok(())
}
