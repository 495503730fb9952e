//! card-fair-value: Fair value estimates and trading signals for trading cards
//!
//! This library provides the core components for:
//! - Per-card price history store built from tabular rows
//! - Rolling-window fair value estimation with a bounded prediction cache
//! - BUY/SELL/HOLD classification against configurable thresholds
//! - Parquet dataset loading
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod series;
pub mod signal;
pub mod telemetry;

pub use error::{DatasetError, PricingError};
pub use model::{FairValueEstimator, Prediction};
pub use series::{PriceRow, SeriesStore};
pub use signal::{classify, Decision, DecisionConfig, Quote, Signal};
