//! Error types shared by the store, estimator and decision engine

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result alias for pricing operations
pub type Result<T> = std::result::Result<T, PricingError>;

/// Errors surfaced by `predict` and `classify`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The card has no series at all
    #[error("Unknown card_id: {0}")]
    UnknownInstrument(String),

    /// No observation at the requested date, or an empty rolling window
    #[error("No data found for card_id={instrument_id} on date={date}")]
    DateNotFound {
        instrument_id: String,
        date: NaiveDate,
    },

    /// Fair value must be positive for the deviation to be defined
    #[error("Fair price must be positive, got: {0}")]
    InvalidFairValue(Decimal),

    /// The model produced no fair value for a non-empty window
    #[error("Fair value out of range for card_id={instrument_id} on date={date}")]
    FairValueUnavailable {
        instrument_id: String,
        date: NaiveDate,
    },

    /// Deviation does not fit in a decimal
    #[error("Deviation of {market_price} from fair price {fair_value} is out of range")]
    DeviationOverflow {
        market_price: Decimal,
        fair_value: Decimal,
    },

    /// Decision thresholds must be non-negative
    #[error("Invalid {name}: {value} (must be non-negative)")]
    InvalidThreshold { name: &'static str, value: Decimal },
}

/// Errors raised while building a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Same card observed twice on one date
    #[error("Duplicate observation for card_id={card_id} on date={date}")]
    DuplicateObservation { card_id: String, date: NaiveDate },

    /// Prices are non-negative
    #[error("Negative market_price {price} for card_id={card_id} on date={date}")]
    NegativePrice {
        card_id: String,
        date: NaiveDate,
        price: Decimal,
    },

    /// Row without a card identifier
    #[error("Empty card_id on date={0}")]
    EmptyInstrumentId(NaiveDate),

    /// Required column absent from the file schema
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// Column present but with an unsupported type
    #[error("Invalid {column} column: {reason}")]
    InvalidColumn {
        column: &'static str,
        reason: String,
    },

    /// Null cell in a required column
    #[error("Null {column} in row {row}")]
    NullValue { column: &'static str, row: usize },

    /// Cell that could not be parsed
    #[error("Invalid {column} value {value:?} in row {row}")]
    InvalidValue {
        column: &'static str,
        row: usize,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
