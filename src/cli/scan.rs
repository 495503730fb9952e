//! Scan command implementation

use super::{load_estimator, print_quote_header, print_quote_row, OutputFormat};
use crate::config::Config;
use crate::error::PricingError;
use crate::signal::{Quote, Signal};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Quote every card on this date instead of its latest date
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Parquet dataset, overrides data.processed_path
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(long, default_value = "4")]
    pub workers: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct ScanReport {
    quotes: Vec<Quote>,
    failures: BTreeMap<String, String>,
    signals: BTreeMap<Signal, usize>,
    cache: crate::model::CacheStats,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let estimator = Arc::new(load_estimator(config, self.data.as_deref())?);
        let decision = config.decision;
        let date = self.date;

        let card_ids = estimator.card_ids();
        let workers = self.workers.max(1);
        let chunk_size = card_ids.len().div_ceil(workers).max(1);

        tracing::info!(cards = card_ids.len(), workers, "Scanning cards");

        let mut tasks = JoinSet::new();
        for chunk in card_ids.chunks(chunk_size) {
            let chunk = chunk.to_vec();
            let estimator = Arc::clone(&estimator);
            tasks.spawn_blocking(move || {
                chunk
                    .into_iter()
                    .map(|card_id| {
                        let result = Quote::evaluate(&*estimator, &card_id, date, &decision);
                        (card_id, result)
                    })
                    .collect::<Vec<(String, Result<Quote, PricingError>)>>()
            });
        }

        let mut quotes = Vec::new();
        let mut failures = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            for (card_id, result) in joined? {
                match result {
                    Ok(quote) => quotes.push(quote),
                    Err(e) => {
                        tracing::warn!(card_id = %card_id, error = %e, "Skipping card");
                        failures.insert(card_id, e.to_string());
                    }
                }
            }
        }
        quotes.sort_by(|a, b| a.card_id.cmp(&b.card_id));

        let mut signals = BTreeMap::new();
        for quote in &quotes {
            *signals.entry(quote.signal).or_insert(0) += 1;
        }

        let report = ScanReport {
            quotes,
            failures,
            signals,
            cache: estimator.cache_stats(),
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => print_report(&report),
        }
        Ok(())
    }
}

fn print_report(report: &ScanReport) {
    print_quote_header();
    for quote in &report.quotes {
        print_quote_row(quote);
    }

    println!();
    for (signal, count) in &report.signals {
        println!("{:<5} {}", signal, count);
    }
    for (card_id, error) in &report.failures {
        println!("FAILED {}: {}", card_id, error);
    }
    println!(
        "Cache: {} hits, {} misses, {}/{} entries",
        report.cache.hits, report.cache.misses, report.cache.size, report.cache.capacity
    );
}
