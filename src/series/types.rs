//! Series types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the construction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Card identifier
    pub card_id: String,
    /// Observation date
    pub date: NaiveDate,
    /// Market price on that date
    pub market_price: Decimal,
}

impl PriceRow {
    /// Create a new price row
    pub fn new(card_id: impl Into<String>, date: NaiveDate, market_price: Decimal) -> Self {
        Self {
            card_id: card_id.into(),
            date,
            market_price,
        }
    }
}

/// A single dated price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub market_price: Decimal,
}

/// Full price history of one card
///
/// Observations are strictly increasing by date and never empty. Only
/// [`SeriesStore`](super::SeriesStore) constructs these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentSeries {
    instrument_id: String,
    observations: Vec<Observation>,
}

impl InstrumentSeries {
    /// Caller guarantees `observations` is sorted, deduplicated and non-empty
    pub(super) fn new(instrument_id: String, observations: Vec<Observation>) -> Self {
        debug_assert!(!observations.is_empty());
        debug_assert!(observations.windows(2).all(|w| w[0].date < w[1].date));
        Self {
            instrument_id,
            observations,
        }
    }

    pub fn instrument_id(&self) -> &str {
        &self.instrument_id
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Earliest observation date
    pub fn first_date(&self) -> NaiveDate {
        self.observations[0].date
    }

    /// Most recent observation date
    pub fn latest_date(&self) -> NaiveDate {
        self.observations[self.observations.len() - 1].date
    }

    /// Exact-date price lookup
    pub fn price_at(&self, date: NaiveDate) -> Option<Decimal> {
        self.observations
            .binary_search_by_key(&date, |o| o.date)
            .ok()
            .map(|idx| self.observations[idx].market_price)
    }

    /// Up to `window_size` most recent observations dated on or before `date`
    pub fn window_before(&self, date: NaiveDate, window_size: usize) -> &[Observation] {
        let end = self.observations.partition_point(|o| o.date <= date);
        let start = end.saturating_sub(window_size);
        &self.observations[start..end]
    }

    /// All observation dates in order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.observations.iter().map(|o| o.date)
    }
}
