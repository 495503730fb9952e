//! Signal command implementation

use super::OutputFormat;
use crate::config::Config;
use crate::signal::{classify, DecisionConfig};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct SignalArgs {
    /// Current market price
    #[arg(long)]
    pub market_price: Decimal,

    /// Fair price estimate
    #[arg(long)]
    pub fair_price: Decimal,

    /// Override decision.buy_threshold_pct
    #[arg(long)]
    pub buy_threshold: Option<Decimal>,

    /// Override decision.sell_threshold_pct
    #[arg(long)]
    pub sell_threshold: Option<Decimal>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl SignalArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let decision_config = DecisionConfig::new(
            self.buy_threshold
                .unwrap_or(config.decision.buy_threshold_pct),
            self.sell_threshold
                .unwrap_or(config.decision.sell_threshold_pct),
        )?;

        let decision = classify(self.market_price, self.fair_price, &decision_config)?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&decision)?),
            OutputFormat::Table => {
                println!("Signal:    {}", decision.signal);
                println!("Deviation: {}", decision.deviation_pct.round_dp(4));
            }
        }
        Ok(())
    }
}
