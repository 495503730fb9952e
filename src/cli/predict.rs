//! Predict command implementation

use super::{load_estimator, print_quote_header, print_quote_row, OutputFormat};
use crate::config::Config;
use crate::signal::Quote;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Card identifier
    #[arg(long)]
    pub card: String,

    /// Prediction date (YYYY-MM-DD), defaults to the card's latest date
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Parquet dataset, overrides data.processed_path
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl PredictArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let estimator = load_estimator(config, self.data.as_deref())?;
        let quote = Quote::evaluate(&estimator, &self.card, self.date, &config.decision)?;

        tracing::info!(
            card_id = %quote.card_id,
            date = %quote.date,
            signal = %quote.signal,
            "Computed quote"
        );

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&quote)?),
            OutputFormat::Table => {
                print_quote_header();
                print_quote_row(&quote);
            }
        }
        Ok(())
    }
}
