//! Decision rules

use super::{Decision, DecisionConfig, Signal};
use crate::error::{PricingError, Result};
use rust_decimal::Decimal;

/// Classify a market price against its fair value
///
/// SELL is checked before BUY, so misconfigured thresholds whose ranges
/// overlap still yield a single deterministic signal.
pub fn classify(
    market_price: Decimal,
    fair_value: Decimal,
    config: &DecisionConfig,
) -> Result<Decision> {
    if fair_value <= Decimal::ZERO {
        return Err(PricingError::InvalidFairValue(fair_value));
    }

    let deviation_pct = market_price
        .checked_sub(fair_value)
        .and_then(|diff| diff.checked_div(fair_value))
        .ok_or(PricingError::DeviationOverflow {
            market_price,
            fair_value,
        })?;

    let signal = if deviation_pct >= config.sell_threshold_pct {
        Signal::Sell
    } else if deviation_pct <= -config.buy_threshold_pct {
        Signal::Buy
    } else {
        Signal::Hold
    };

    Ok(Decision {
        signal,
        deviation_pct,
    })
}
