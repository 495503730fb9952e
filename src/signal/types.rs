//! Signal types

use crate::error::{PricingError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trading signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    /// Market price well below fair value
    Buy,
    /// Market price well above fair value
    Sell,
    /// Within thresholds
    Hold,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds for signal classification
///
/// Both are fractions: `0.10` means ten percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// BUY when market is at least this far below fair value
    #[serde(default = "default_buy_threshold_pct")]
    pub buy_threshold_pct: Decimal,
    /// SELL when market is at least this far above fair value
    #[serde(default = "default_sell_threshold_pct")]
    pub sell_threshold_pct: Decimal,
}

fn default_buy_threshold_pct() -> Decimal {
    dec!(0.10)
}
fn default_sell_threshold_pct() -> Decimal {
    dec!(0.15)
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            buy_threshold_pct: default_buy_threshold_pct(),
            sell_threshold_pct: default_sell_threshold_pct(),
        }
    }
}

impl DecisionConfig {
    /// Create a validated decision config
    pub fn new(buy_threshold_pct: Decimal, sell_threshold_pct: Decimal) -> Result<Self> {
        let config = Self {
            buy_threshold_pct,
            sell_threshold_pct,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check both thresholds are non-negative
    pub fn validate(&self) -> Result<()> {
        if self.buy_threshold_pct < Decimal::ZERO {
            return Err(PricingError::InvalidThreshold {
                name: "buy_threshold_pct",
                value: self.buy_threshold_pct,
            });
        }
        if self.sell_threshold_pct < Decimal::ZERO {
            return Err(PricingError::InvalidThreshold {
                name: "sell_threshold_pct",
                value: self.sell_threshold_pct,
            });
        }
        Ok(())
    }
}

/// Outcome of classifying a price pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub signal: Signal,
    /// `(market_price - fair_value) / fair_value`, positive when overvalued
    pub deviation_pct: Decimal,
}
