//! Time-series store
//!
//! Per-card price history built once from tabular rows

mod store;
mod types;

pub use store::SeriesStore;
pub use types::{InstrumentSeries, Observation, PriceRow};
