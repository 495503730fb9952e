//! Estimator value types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of a fair value prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Date the prediction was made for
    pub resolved_date: NaiveDate,
    /// Observed price on that date
    pub market_price: Decimal,
    /// Estimated fair value
    pub fair_value: Decimal,
}

/// Whether the rolling window includes the target date's own price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
    /// Window ends on the target date (inclusive)
    #[default]
    IncludeTarget,
    /// Window ends the day before the target date
    PriorOnly,
}

impl WindowPolicy {
    /// Last date the window may contain, `None` if it would precede the calendar
    pub fn window_end(self, target: NaiveDate) -> Option<NaiveDate> {
        match self {
            WindowPolicy::IncludeTarget => Some(target),
            WindowPolicy::PriorOnly => target.pred_opt(),
        }
    }
}

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub capacity: usize,
    /// `hits / (hits + misses)`, zero before the first request
    pub hit_rate: f64,
    pub total_requests: u64,
}

impl CacheStats {
    pub(super) fn new(hits: u64, misses: u64, size: usize, capacity: usize) -> Self {
        let total_requests = hits + misses;
        let hit_rate = if total_requests > 0 {
            hits as f64 / total_requests as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            size,
            capacity,
            hit_rate,
            total_requests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_end() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(WindowPolicy::IncludeTarget.window_end(d), Some(d));
        assert_eq!(
            WindowPolicy::PriorOnly.window_end(d),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(WindowPolicy::PriorOnly.window_end(NaiveDate::MIN), None);
    }

    #[test]
    fn test_hit_rate_without_requests() {
        let stats = CacheStats::new(0, 0, 0, 10);
        assert_eq!(stats.hit_rate, 0.0);
        assert_eq!(stats.total_requests, 0);
    }

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats::new(3, 1, 1, 10);
        assert!((stats.hit_rate - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_window_policy_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: WindowPolicy,
        }
        let w: Wrapper = toml::from_str(r#"policy = "prior_only""#).unwrap();
        assert_eq!(w.policy, WindowPolicy::PriorOnly);
    }
}
