//! Fair value estimator
//!
//! Resolves the prediction date, serves repeated requests from a bounded
//! cache and otherwise computes the fair value over a trailing window.

use super::cache::PredictionCache;
use super::{
    CacheStats, FairValueModel, Prediction, RollingMean, WindowPolicy, DEFAULT_CACHE_CAPACITY,
    DEFAULT_WINDOW_SIZE,
};
use crate::config::ModelConfig;
use crate::error::{PricingError, Result};
use crate::series::SeriesStore;
use crate::telemetry::{self, CounterMetric, GaugeMetric};
use chrono::NaiveDate;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Builder for [`FairValueEstimator`]
pub struct EstimatorBuilder<M: FairValueModel = RollingMean> {
    store: SeriesStore,
    model: M,
    window_size: usize,
    window_policy: WindowPolicy,
    cache_capacity: usize,
}

impl EstimatorBuilder<RollingMean> {
    fn new(store: SeriesStore) -> Self {
        Self {
            store,
            model: RollingMean,
            window_size: DEFAULT_WINDOW_SIZE,
            window_policy: WindowPolicy::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl<M: FairValueModel> EstimatorBuilder<M> {
    /// Trailing window length, at least one observation
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn window_policy(mut self, policy: WindowPolicy) -> Self {
        self.window_policy = policy;
        self
    }

    /// Maximum cached predictions; zero disables caching
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Swap the fair value model
    pub fn model<N: FairValueModel>(self, model: N) -> EstimatorBuilder<N> {
        EstimatorBuilder {
            store: self.store,
            model,
            window_size: self.window_size,
            window_policy: self.window_policy,
            cache_capacity: self.cache_capacity,
        }
    }

    pub fn build(self) -> FairValueEstimator<M> {
        if self.window_size == 0 {
            tracing::warn!("window_size of 0 is invalid, using 1");
        }
        let window_size = self.window_size.max(1);

        match self.store.date_range() {
            Some((first, last)) => tracing::info!(
                cards = self.store.len(),
                observations = self.store.observation_count(),
                %first,
                %last,
                window_size,
                window_policy = ?self.window_policy,
                model = self.model.name(),
                cache_capacity = self.cache_capacity,
                "Initialized fair value estimator"
            ),
            None => tracing::warn!("Initialized fair value estimator with an empty dataset"),
        }
        telemetry::set_gauge(GaugeMetric::LoadedCards, self.store.len() as f64);
        telemetry::set_gauge(GaugeMetric::CacheSize, 0.0);

        FairValueEstimator {
            store: self.store,
            model: self.model,
            window_size,
            window_policy: self.window_policy,
            cache: Mutex::new(PredictionCache::new(self.cache_capacity)),
        }
    }
}

/// Fair value estimator over an immutable series store
///
/// Safe to share between threads behind an `Arc`: the cache and its
/// counters sit behind a single lock held for the whole of [`predict`].
///
/// [`predict`]: FairValueEstimator::predict
pub struct FairValueEstimator<M: FairValueModel = RollingMean> {
    store: SeriesStore,
    model: M,
    window_size: usize,
    window_policy: WindowPolicy,
    cache: Mutex<PredictionCache>,
}

impl FairValueEstimator<RollingMean> {
    /// Estimator with default window, policy and cache capacity
    pub fn new(store: SeriesStore) -> Self {
        Self::builder(store).build()
    }

    pub fn builder(store: SeriesStore) -> EstimatorBuilder<RollingMean> {
        EstimatorBuilder::new(store)
    }

    /// Estimator configured from the `[model]` config section
    pub fn from_config(store: SeriesStore, config: &ModelConfig) -> Self {
        Self::builder(store)
            .window_size(config.window_size)
            .window_policy(config.window_policy)
            .cache_capacity(config.cache_capacity)
            .build()
    }
}

impl<M: FairValueModel> FairValueEstimator<M> {
    /// Fair value and market price for a card
    ///
    /// Without a date the card's latest observation is used. An explicit
    /// date must have an exact observation; no nearby date is substituted.
    pub fn predict(&self, instrument_id: &str, date: Option<NaiveDate>) -> Result<Prediction> {
        let series = self.store.series(instrument_id)?;
        let resolved_date = date.unwrap_or_else(|| series.latest_date());
        let key = (instrument_id.to_string(), resolved_date);

        let mut cache = self.lock_cache();

        if let Some(prediction) = cache.lookup(&key) {
            telemetry::increment(CounterMetric::CacheHit);
            tracing::debug!(card_id = instrument_id, date = %resolved_date, "Prediction cache hit");
            return Ok(prediction);
        }
        telemetry::increment(CounterMetric::CacheMiss);

        let prediction = self.compute(instrument_id, resolved_date)?;

        if let Some((evicted_id, evicted_date)) = cache.insert(key, prediction) {
            telemetry::increment(CounterMetric::CacheEviction);
            tracing::debug!(
                card_id = %evicted_id,
                date = %evicted_date,
                "Evicted oldest cached prediction"
            );
        }
        telemetry::set_gauge(GaugeMetric::CacheSize, cache.len() as f64);

        tracing::debug!(
            card_id = instrument_id,
            date = %resolved_date,
            market_price = %prediction.market_price,
            fair_value = %prediction.fair_value,
            "Computed fair value"
        );

        Ok(prediction)
    }

    fn compute(&self, instrument_id: &str, resolved_date: NaiveDate) -> Result<Prediction> {
        let not_found = || PricingError::DateNotFound {
            instrument_id: instrument_id.to_string(),
            date: resolved_date,
        };

        let market_price = self.store.price_at(instrument_id, resolved_date)?;

        let window_end = self.window_policy.window_end(resolved_date).ok_or_else(not_found)?;
        let window = self
            .store
            .window_before(instrument_id, window_end, self.window_size)
            .map_err(|_| not_found())?;
        let fair_value = self
            .model
            .calculate(&window)
            .ok_or_else(|| PricingError::FairValueUnavailable {
                instrument_id: instrument_id.to_string(),
                date: resolved_date,
            })?;

        Ok(Prediction {
            resolved_date,
            market_price,
            fair_value,
        })
    }

    /// Current cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.lock_cache().stats()
    }

    /// Empty the cache and reset hit/miss counters
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
        telemetry::set_gauge(GaugeMetric::CacheSize, 0.0);
        tracing::info!("Prediction cache cleared");
    }

    /// Sorted ids of every known card
    pub fn card_ids(&self) -> Vec<String> {
        self.store.instrument_ids()
    }

    pub fn card_count(&self) -> usize {
        self.store.len()
    }

    /// Latest observation date, `None` for an unknown card
    pub fn latest_date(&self, instrument_id: &str) -> Option<NaiveDate> {
        self.store.latest_date(instrument_id).ok()
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn window_policy(&self) -> WindowPolicy {
        self.window_policy
    }

    // Cache state is only mutated in whole steps under the lock, so a
    // poisoned guard still holds a consistent cache.
    fn lock_cache(&self) -> MutexGuard<'_, PredictionCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
