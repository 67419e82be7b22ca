//! Rendering command results to stdout.

use std::fmt::Write as _;

use leafcart_cart::CartSummary;
use leafcart_core::{CurrencyCode, Purchase, PurchaseStats};
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Render a cart summary as text.
#[must_use]
pub fn cart_text(summary: &CartSummary) -> String {
    if summary.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Shopping Cart ({} items)", summary.line_count);
    for line in &summary.lines {
        let _ = writeln!(
            out,
            "  {:<32} {:>4} x {:>10} = {:>10}",
            line.name, line.quantity, line.price, line.line_price
        );
    }
    let _ = writeln!(out, "Subtotal ({} items): {}", summary.item_count, summary.subtotal);
    let _ = writeln!(out, "Shipping: {}", summary.shipping);
    let _ = writeln!(out, "Tax: {}", summary.tax);
    let _ = writeln!(out, "Total: {}", summary.total);
    out
}

/// Render a completed purchase as text.
#[must_use]
pub fn purchase_text(purchase: &Purchase, currency: CurrencyCode) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Purchase {} completed on {}",
        purchase.id,
        purchase.purchase_date.format("%Y-%m-%d %H:%M UTC")
    );
    for item in &purchase.items {
        let _ = writeln!(
            out,
            "  {:<32} {:>4} x {:>10} = {:>10}",
            item.title,
            item.quantity,
            currency.format(item.price.amount()),
            currency.format(item.line_total())
        );
    }
    let _ = writeln!(out, "Total: {}", currency.format(purchase.total_amount));
    out
}

/// Render purchase statistics as text.
#[must_use]
pub fn stats_text(stats: &PurchaseStats, currency: CurrencyCode) -> String {
    format!(
        "Total orders: {}\nTotal spent: {}\nItems purchased: {}\n",
        stats.total_purchases,
        currency.format(stats.total_spent),
        stats.total_items
    )
}

/// Write a value to stdout in the chosen format.
pub fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce() -> String) {
    let rendered = match format {
        OutputFormat::Text => text(),
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(json) => format!("{json}\n"),
            Err(e) => {
                tracing::error!("Failed to serialize output: {e}");
                return;
            }
        },
    };

    #[allow(clippy::print_stdout)]
    {
        print!("{rendered}");
    }
}
