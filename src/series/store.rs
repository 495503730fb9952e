//! In-memory store of card price series

use super::{InstrumentSeries, Observation, PriceRow};
use crate::error::{DatasetError, PricingError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{btree_map::Entry, BTreeMap, HashMap};

/// Immutable map from card id to its price series
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    series: HashMap<String, InstrumentSeries>,
}

impl SeriesStore {
    /// Build a store from rows in any order
    ///
    /// Rejects duplicate `(card_id, date)` pairs, negative prices and empty
    /// card ids. The whole input is validated before anything is returned.
    pub fn from_rows<I>(rows: I) -> std::result::Result<Self, DatasetError>
    where
        I: IntoIterator<Item = PriceRow>,
    {
        let mut grouped: HashMap<String, BTreeMap<NaiveDate, Decimal>> = HashMap::new();

        for row in rows {
            if row.card_id.is_empty() {
                return Err(DatasetError::EmptyInstrumentId(row.date));
            }
            if row.market_price < Decimal::ZERO {
                return Err(DatasetError::NegativePrice {
                    card_id: row.card_id,
                    date: row.date,
                    price: row.market_price,
                });
            }

            let by_date = grouped.entry(row.card_id.clone()).or_default();
            match by_date.entry(row.date) {
                Entry::Occupied(_) => {
                    return Err(DatasetError::DuplicateObservation {
                        card_id: row.card_id,
                        date: row.date,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(row.market_price);
                }
            }
        }

        let series = grouped
            .into_iter()
            .map(|(card_id, by_date)| {
                let observations = by_date
                    .into_iter()
                    .map(|(date, market_price)| Observation { date, market_price })
                    .collect();
                (card_id.clone(), InstrumentSeries::new(card_id, observations))
            })
            .collect();

        Ok(Self { series })
    }

    /// Look up a card's series
    pub fn series(&self, instrument_id: &str) -> Result<&InstrumentSeries> {
        self.series
            .get(instrument_id)
            .ok_or_else(|| PricingError::UnknownInstrument(instrument_id.to_string()))
    }

    pub fn contains(&self, instrument_id: &str) -> bool {
        self.series.contains_key(instrument_id)
    }

    /// Number of cards
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total observations across all cards
    pub fn observation_count(&self) -> usize {
        self.series.values().map(InstrumentSeries::len).sum()
    }

    /// Sorted card ids
    pub fn instrument_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.series.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Earliest and latest observation dates over the whole store
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.series.values().map(InstrumentSeries::first_date).min()?;
        let last = self.series.values().map(InstrumentSeries::latest_date).max()?;
        Some((first, last))
    }

    /// Most recent observation date for a card
    pub fn latest_date(&self, instrument_id: &str) -> Result<NaiveDate> {
        Ok(self.series(instrument_id)?.latest_date())
    }

    /// Up to `window_size` most recent prices on or before `date`, oldest first
    pub fn window_before(
        &self,
        instrument_id: &str,
        date: NaiveDate,
        window_size: usize,
    ) -> Result<Vec<Decimal>> {
        let window = self.series(instrument_id)?.window_before(date, window_size);
        if window.is_empty() {
            return Err(PricingError::DateNotFound {
                instrument_id: instrument_id.to_string(),
                date,
            });
        }
        Ok(window.iter().map(|o| o.market_price).collect())
    }

    /// Price observed on exactly `date`
    pub fn price_at(&self, instrument_id: &str, date: NaiveDate) -> Result<Decimal> {
        self.series(instrument_id)?
            .price_at(date)
            .ok_or_else(|| PricingError::DateNotFound {
                instrument_id: instrument_id.to_string(),
                date,
            })
    }

    /// Every date with an observation for a card
    pub fn available_dates(&self, instrument_id: &str) -> Result<Vec<NaiveDate>> {
        Ok(self.series(instrument_id)?.dates().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn store() -> SeriesStore {
        SeriesStore::from_rows(vec![
            PriceRow::new("c1", day(3), dec!(80)),
            PriceRow::new("c1", day(1), dec!(100)),
            PriceRow::new("c2", day(2), dec!(50)),
            PriceRow::new("c1", day(2), dec!(90)),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_rows_sorts_each_series() {
        let store = store();
        let dates: Vec<_> = store.available_dates("c1").unwrap();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.observation_count(), 4);
    }

    #[test]
    fn test_from_rows_rejects_duplicate_date() {
        let result = SeriesStore::from_rows(vec![
            PriceRow::new("c1", day(1), dec!(100)),
            PriceRow::new("c1", day(1), dec!(101)),
        ]);
        assert!(matches!(
            result,
            Err(DatasetError::DuplicateObservation { ref card_id, .. }) if card_id == "c1"
        ));
    }

    #[test]
    fn test_from_rows_rejects_negative_price() {
        let result = SeriesStore::from_rows(vec![PriceRow::new("c1", day(1), dec!(-0.01))]);
        assert!(matches!(result, Err(DatasetError::NegativePrice { .. })));
    }

    #[test]
    fn test_from_rows_accepts_zero_price() {
        let store = SeriesStore::from_rows(vec![PriceRow::new("c1", day(1), dec!(0))]).unwrap();
        assert_eq!(store.price_at("c1", day(1)).unwrap(), dec!(0));
    }

    #[test]
    fn test_from_rows_rejects_empty_card_id() {
        let result = SeriesStore::from_rows(vec![PriceRow::new("", day(1), dec!(1))]);
        assert!(matches!(result, Err(DatasetError::EmptyInstrumentId(_))));
    }

    #[test]
    fn test_latest_date_unknown_card() {
        let store = store();
        assert_eq!(store.latest_date("c1").unwrap(), day(3));
        assert_eq!(
            store.latest_date("nope"),
            Err(PricingError::UnknownInstrument("nope".to_string()))
        );
    }

    #[test]
    fn test_window_before_empty_is_date_not_found() {
        let store = store();
        let err = store.window_before("c2", day(1), 3).unwrap_err();
        assert!(matches!(err, PricingError::DateNotFound { .. }));
    }

    #[test]
    fn test_window_before_is_chronological() {
        let store = store();
        let window = store.window_before("c1", day(3), 3).unwrap();
        assert_eq!(window, vec![dec!(100), dec!(90), dec!(80)]);
    }

    #[test]
    fn test_price_at_missing_date() {
        let store = store();
        let err = store.price_at("c2", day(3)).unwrap_err();
        assert_eq!(
            err,
            PricingError::DateNotFound {
                instrument_id: "c2".to_string(),
                date: day(3),
            }
        );
    }

    #[test]
    fn test_date_range_and_ids() {
        let store = store();
        assert_eq!(store.date_range(), Some((day(1), day(3))));
        assert_eq!(store.instrument_ids(), vec!["c1", "c2"]);
        assert!(SeriesStore::default().date_range().is_none());
    }
}
