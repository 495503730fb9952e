//! Bounded prediction cache with insertion-order eviction

use super::{CacheStats, Prediction};
use chrono::NaiveDate;
use std::collections::{HashMap, VecDeque};

pub(super) type CacheKey = (String, NaiveDate);

/// FIFO cache keyed by `(card_id, resolved_date)`
///
/// Reads never reorder entries; the oldest insert is always evicted first.
#[derive(Debug)]
pub(super) struct PredictionCache {
    entries: HashMap<CacheKey, Prediction>,
    order: VecDeque<CacheKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl PredictionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a key and count the outcome
    pub fn lookup(&mut self, key: &CacheKey) -> Option<Prediction> {
        match self.entries.get(key) {
            Some(prediction) => {
                self.hits += 1;
                Some(*prediction)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert a fresh prediction, returning the evicted key if the cache was full
    pub fn insert(&mut self, key: CacheKey, prediction: Prediction) -> Option<CacheKey> {
        if self.capacity == 0 || self.entries.contains_key(&key) {
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.order.pop_front().inspect(|oldest| {
                self.entries.remove(oldest);
            })
        } else {
            None
        };

        self.order.push_back(key.clone());
        self.entries.insert(key, prediction);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats::new(self.hits, self.misses, self.entries.len(), self.capacity)
    }

    /// Drop all entries and reset counters
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
