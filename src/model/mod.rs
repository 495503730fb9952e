//! Fair value model module
//!
//! Rolling-window fair value estimation with a bounded prediction cache

mod cache;
mod estimator;
mod types;

pub use estimator::{EstimatorBuilder, FairValueEstimator};
pub use types::{CacheStats, Prediction, WindowPolicy};

use rust_decimal::Decimal;

/// Default trailing window length
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Default number of cached predictions
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Trait for fair value model implementations
pub trait FairValueModel: Send + Sync {
    /// Short model identifier for logs
    fn name(&self) -> &'static str;

    /// Fair value from a chronological price window
    ///
    /// `None` if the window is empty or the result does not fit in a decimal.
    fn calculate(&self, window: &[Decimal]) -> Option<Decimal>;
}

/// Arithmetic mean of the window
#[derive(Debug, Clone, Copy, Default)]
pub struct RollingMean;

impl FairValueModel for RollingMean {
    fn name(&self) -> &'static str {
        "rolling_mean"
    }

    fn calculate(&self, window: &[Decimal]) -> Option<Decimal> {
        if window.is_empty() {
            return None;
        }
        let sum = window
            .iter()
            .try_fold(Decimal::ZERO, |acc, price| acc.checked_add(*price))?;
        sum.checked_div(Decimal::from(window.len()))
    }
}
