//! CLI interface for card-fair-value
//!
//! Provides subcommands for:
//! - `predict`: Fair value and signal for one card
//! - `signal`: Classify a market/fair price pair
//! - `cards`: List known cards
//! - `scan`: Quote every card concurrently
//! - `config`: Show effective configuration

mod cards;
mod predict;
mod scan;
mod signal;

pub use cards::CardsArgs;
pub use predict::PredictArgs;
pub use scan::ScanArgs;
pub use signal::SignalArgs;

use crate::config::Config;
use crate::data;
use crate::model::FairValueEstimator;
use crate::signal::Quote;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "card-fair-value")]
#[command(about = "Fair value estimates and BUY/SELL/HOLD signals for trading cards")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fair value and signal for one card
    Predict(PredictArgs),
    /// Classify a market price against a fair price
    Signal(SignalArgs),
    /// List known cards with their latest date
    Cards(CardsArgs),
    /// Quote every card concurrently
    Scan(ScanArgs),
    /// Show effective configuration
    Config,
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Load the dataset named by `data` or the config, and build an estimator
pub(crate) fn load_estimator(
    config: &Config,
    data: Option<&Path>,
) -> anyhow::Result<FairValueEstimator> {
    let path = data.unwrap_or(config.data.processed_path.as_path());
    let store = data::load_store(path)?;
    Ok(FairValueEstimator::from_config(store, &config.model))
}

pub(crate) fn print_quote_header() {
    println!(
        "{:<40} {:>10} {:>12} {:>12} {:>10}  {}",
        "CARD", "DATE", "MARKET", "FAIR", "DEV %", "SIGNAL"
    );
}

pub(crate) fn print_quote_row(quote: &Quote) {
    let deviation = (quote.deviation_pct * rust_decimal_macros::dec!(100)).round_dp(2);
    println!(
        "{:<40} {:>10} {:>12} {:>12} {:>10}  {}",
        quote.card_id,
        quote.date,
        quote.market_price.round_dp(2),
        quote.fair_price.round_dp(2),
        deviation,
        quote.signal
    );
}
