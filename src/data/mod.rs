//! Dataset loading
//!
//! Reads card price rows from Parquet and builds the series store

mod parquet;

pub use self::parquet::{price_row_schema, ParquetReader, ParquetWriter};

use crate::error::DatasetError;
use crate::series::SeriesStore;
use std::path::Path;

/// Load a Parquet price file into a validated store
pub fn load_store(path: impl AsRef<Path>) -> Result<SeriesStore, DatasetError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading price dataset");

    let rows = ParquetReader::new(path).read_price_rows()?;
    let row_count = rows.len();
    let store = SeriesStore::from_rows(rows)?;

    tracing::info!(
        rows = row_count,
        cards = store.len(),
        "Loaded price dataset"
    );
    Ok(store)
}
