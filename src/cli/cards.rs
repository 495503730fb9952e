//! Cards command implementation

use super::load_estimator;
use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CardsArgs {
    /// Parquet dataset, overrides data.processed_path
    #[arg(long)]
    pub data: Option<PathBuf>,
}

impl CardsArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let estimator = load_estimator(config, self.data.as_deref())?;
        let store = estimator.store();

        println!("{:<40} {:>12} {:>6}", "CARD", "LATEST", "DAYS");
        for card_id in estimator.card_ids() {
            let series = store.series(&card_id)?;
            println!(
                "{:<40} {:>12} {:>6}",
                card_id,
                series.latest_date(),
                series.len()
            );
        }
        println!("{} cards", estimator.card_count());
        Ok(())
    }
}
