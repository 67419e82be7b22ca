//! Leafcart CLI - Cart replay, checkout and purchase history tools.
//!
//! # Usage
//!
//! ```bash
//! # Replay a cart script and print the cart
//! leafcart replay cart.yaml
//!
//! # Replay a cart script and check it out
//! leafcart checkout cart.yaml
//!
//! # Summarize purchase history
//! leafcart history purchases.json --format json
//! ```
//!
//! # Commands
//!
//! - `replay` - Apply cart operations from a YAML script
//! - `checkout` - Replay, then finalize the order through the marketplace API
//! - `history` - Purchase statistics from a JSON purchase history
//!
//! Logs go to stderr and are filtered with `RUST_LOG` (default: `info`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leafcart_core::CurrencyCode;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;
mod script;

use error::CliError;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "leafcart")]
#[command(author, version, about = "Leafcart cart tools")]
struct Cli {
    /// Output format for results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Display currency (USD, EUR, GBP, CAD, AUD)
    #[arg(long, global = true, value_parser = parse_currency)]
    currency: Option<CurrencyCode>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a cart script and print the resulting cart
    Replay {
        /// Path to the YAML cart script
        script: PathBuf,
    },
    /// Apply a cart script and check out the resulting cart
    Checkout {
        /// Path to the YAML cart script
        script: PathBuf,
    },
    /// Print statistics for a purchase history file
    History {
        /// Path to the JSON purchase history
        purchases: PathBuf,
    },
}

fn parse_currency(value: &str) -> Result<CurrencyCode, String> {
    value.parse()
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.json_logs);

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Replay { script } => {
            commands::replay::run(&script, cli.currency, cli.format).await
        }
        Commands::Checkout { script } => {
            commands::checkout::run(&script, cli.currency, cli.format).await
        }
        Commands::History { purchases } => {
            commands::history::run(&purchases, cli.currency, cli.format).await
        }
    }
}
