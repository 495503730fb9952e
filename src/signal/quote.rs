//! Combined fair price quote

use super::{classify, DecisionConfig, Signal};
use crate::error::Result;
use crate::model::{FairValueEstimator, FairValueModel};
use crate::telemetry;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Prediction plus trading signal for one card and date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub card_id: String,
    /// Resolved prediction date
    pub date: NaiveDate,
    pub market_price: Decimal,
    pub fair_price: Decimal,
    pub deviation_pct: Decimal,
    pub signal: Signal,
}

impl Quote {
    /// Predict, then classify the result
    pub fn evaluate<M: FairValueModel>(
        estimator: &FairValueEstimator<M>,
        card_id: &str,
        date: Option<NaiveDate>,
        config: &DecisionConfig,
    ) -> Result<Self> {
        let prediction = estimator.predict(card_id, date)?;
        let decision = classify(prediction.market_price, prediction.fair_value, config)?;
        telemetry::record_signal(decision.signal);

        Ok(Self {
            card_id: card_id.to_string(),
            date: prediction.resolved_date,
            market_price: prediction.market_price,
            fair_price: prediction.fair_value,
            deviation_pct: decision.deviation_pct,
            signal: decision.signal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use crate::series::{PriceRow, SeriesStore};
    use rust_decimal_macros::dec;

    #[test]
    fn test_evaluate_zero_fair_value() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let store = SeriesStore::from_rows(vec![PriceRow::new("free", date, dec!(0))]).unwrap();
        let estimator = FairValueEstimator::new(store);

        let err = Quote::evaluate(&estimator, "free", None, &DecisionConfig::default())
            .unwrap_err();
        assert_eq!(err, PricingError::InvalidFairValue(dec!(0)));
    }
}
