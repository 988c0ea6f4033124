//! Shopfront CLI - Offline cart quotes and wishlist summaries.
//!
//! # Usage
//!
//! ```bash
//! # Price a saved cart with the default policy ($5.99 shipping, 10% tax)
//! shopfront-cli quote cart.json
//!
//! # Override the policy
//! shopfront-cli quote cart.json --shipping 0 --tax-rate 0.08
//!
//! # Machine-readable totals
//! shopfront-cli quote cart.json --json
//!
//! # Summarize a saved wishlist
//! shopfront-cli wishlist wishlist.json
//! ```
//!
//! # Commands
//!
//! - `quote` - Price a cart file
//! - `wishlist` - Summarize a wishlist file
//!
//! Cart and wishlist files use the same JSON layout the storefront keeps in
//! the session: an array of lines or entries.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use shopfront_core::{CurrencyCode, Money};

mod commands;

#[derive(Parser)]
#[command(name = "shopfront-cli")]
#[command(author, version, about = "Shopfront CLI tools")]
struct Cli {
    /// Currency used to format amounts
    #[arg(long, global = true, env = "SHOPFRONT_CURRENCY", default_value = "USD")]
    currency: CurrencyCode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a cart file
    Quote {
        /// Path to the cart JSON file
        file: PathBuf,

        /// Flat shipping charge
        #[arg(long, env = "SHOPFRONT_SHIPPING_FLAT", default_value = "5.99")]
        shipping: Money,

        /// Tax rate as a fraction of the subtotal
        #[arg(long, env = "SHOPFRONT_TAX_RATE", default_value = "0.10")]
        tax_rate: Decimal,

        /// Print the exact totals as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize a wishlist file
    Wishlist {
        /// Path to the wishlist JSON file
        file: PathBuf,
    },
}

fn main() {
    // Pick up SHOPFRONT_* overrides from .env before clap reads them
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopfront_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), commands::CommandError> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let report = match cli.command {
        Commands::Quote {
            file,
            shipping,
            tax_rate,
            json,
        } => {
            let quote = commands::quote::run(&file, shipping, tax_rate)?;
            if json {
                quote.to_json()?
            } else {
                quote.render(cli.currency)
            }
        }
        Commands::Wishlist { file } => commands::wishlist::run(&file)?.render(cli.currency),
    };

    println!("{report}");
    Ok(())
}
