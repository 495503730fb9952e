//! Parquet reader and writer for card price rows

use crate::error::DatasetError;
use crate::series::PriceRow;
use arrow::array::{Array, ArrayRef, Date32Array, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rust_decimal::Decimal;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

const CARD_ID: &str = "card_id";
const DATE: &str = "date";
const MARKET_PRICE: &str = "market_price";

/// Price row schema written by [`ParquetWriter`]
///
/// Prices are stored as strings to keep decimal precision.
pub fn price_row_schema() -> Schema {
    Schema::new(vec![
        Field::new(CARD_ID, DataType::Utf8, false),
        Field::new(DATE, DataType::Date32, false),
        Field::new(MARKET_PRICE, DataType::Utf8, false),
    ])
}

/// Writes price rows to a single Parquet file
pub struct ParquetWriter {
    path: PathBuf,
}

impl ParquetWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write all rows, creating parent directories as needed
    pub fn write_price_rows(&self, rows: &[PriceRow]) -> Result<(), DatasetError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let schema = Arc::new(price_row_schema());
        let file = File::create(&self.path)?;

        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        let card_ids: Vec<&str> = rows.iter().map(|r| r.card_id.as_str()).collect();
        let dates: Vec<i32> = rows.iter().map(|r| days_since_epoch(r.date)).collect();
        let prices: Vec<String> = rows.iter().map(|r| r.market_price.to_string()).collect();

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(card_ids)) as ArrayRef,
                Arc::new(Date32Array::from(dates)) as ArrayRef,
                Arc::new(StringArray::from(
                    prices.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                )) as ArrayRef,
            ],
        )?;

        writer.write(&batch)?;
        writer.close()?;

        tracing::debug!(path = ?self.path, count = rows.len(), "Wrote price rows to Parquet");

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reader for price row Parquet files
///
/// Accepts `date` as Date32 (or anything Arrow can cast to it, such as
/// `YYYY-MM-DD` strings or timestamps) and `market_price` as a decimal
/// string or any numeric type. Other columns are ignored.
pub struct ParquetReader {
    path: PathBuf,
}

impl ParquetReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read every row in file order
    pub fn read_price_rows(&self) -> Result<Vec<PriceRow>, DatasetError> {
        let file = File::open(&self.path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

        let schema = builder.schema().clone();
        let card_idx = column_index(&schema, CARD_ID)?;
        let date_idx = column_index(&schema, DATE)?;
        let price_idx = column_index(&schema, MARKET_PRICE)?;

        let reader = builder.build()?;
        let mut rows = Vec::new();

        for batch_result in reader {
            let batch = batch_result?;
            let offset = rows.len();

            let card_ids = cast_column(batch.column(card_idx), CARD_ID, &DataType::Utf8)?;
            let card_ids = downcast::<StringArray>(&card_ids, CARD_ID)?;

            let dates = cast_column(batch.column(date_idx), DATE, &DataType::Date32)?;
            let dates = downcast::<Date32Array>(&dates, DATE)?;

            let prices = PriceColumn::new(batch.column(price_idx))?;

            for i in 0..batch.num_rows() {
                let row = offset + i;

                if card_ids.is_null(i) {
                    return Err(DatasetError::NullValue { column: CARD_ID, row });
                }
                if dates.is_null(i) {
                    return Err(DatasetError::NullValue { column: DATE, row });
                }
                let date = dates
                    .value_as_date(i)
                    .ok_or_else(|| DatasetError::InvalidValue {
                        column: DATE,
                        row,
                        value: dates.value(i).to_string(),
                    })?;

                rows.push(PriceRow {
                    card_id: card_ids.value(i).to_string(),
                    date,
                    market_price: prices.value(i, row)?,
                });
            }
        }

        tracing::debug!(path = ?self.path, count = rows.len(), "Read price rows from Parquet");

        Ok(rows)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Price column as either exact decimal strings or floats
enum PriceColumn {
    Text(StringArray),
    Float(Float64Array),
}

impl PriceColumn {
    fn new(column: &ArrayRef) -> Result<Self, DatasetError> {
        match column.data_type() {
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
                let text = cast_column(column, MARKET_PRICE, &DataType::Utf8)?;
                Ok(Self::Text(downcast::<StringArray>(&text, MARKET_PRICE)?.clone()))
            }
            _ => {
                let floats = cast_column(column, MARKET_PRICE, &DataType::Float64)?;
                Ok(Self::Float(downcast::<Float64Array>(&floats, MARKET_PRICE)?.clone()))
            }
        }
    }

    fn value(&self, i: usize, row: usize) -> Result<Decimal, DatasetError> {
        let invalid = |value: String| DatasetError::InvalidValue {
            column: MARKET_PRICE,
            row,
            value,
        };

        match self {
            Self::Text(array) => {
                if array.is_null(i) {
                    return Err(DatasetError::NullValue { column: MARKET_PRICE, row });
                }
                let raw = array.value(i);
                Decimal::from_str(raw.trim()).map_err(|_| invalid(raw.to_string()))
            }
            Self::Float(array) => {
                if array.is_null(i) {
                    return Err(DatasetError::NullValue { column: MARKET_PRICE, row });
                }
                let raw = array.value(i);
                Decimal::try_from(raw).map_err(|_| invalid(raw.to_string()))
            }
        }
    }
}

fn column_index(schema: &Schema, name: &'static str) -> Result<usize, DatasetError> {
    schema
        .index_of(name)
        .map_err(|_| DatasetError::MissingColumn(name))
}

fn cast_column(
    column: &ArrayRef,
    name: &'static str,
    to: &DataType,
) -> Result<ArrayRef, DatasetError> {
    cast(column, to).map_err(|e| DatasetError::InvalidColumn {
        column: name,
        reason: e.to_string(),
    })
}

fn downcast<'a, T: 'static>(column: &'a ArrayRef, name: &'static str) -> Result<&'a T, DatasetError> {
    column
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| DatasetError::InvalidColumn {
            column: name,
            reason: format!("unexpected type {}", column.data_type()),
        })
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    date.signed_duration_since(DateTime::UNIX_EPOCH.date_naive())
        .num_days() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn write_batch(path: &Path, schema: Schema, columns: Vec<ArrayRef>) {
        let schema = Arc::new(schema);
        let file = File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema.clone(), None).unwrap();
        writer
            .write(&RecordBatch::try_new(schema, columns).unwrap())
            .unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn test_price_row_schema() {
        let schema = price_row_schema();
        assert_eq!(schema.fields().len(), 3);
        assert_eq!(schema.field(0).name(), "card_id");
        assert_eq!(schema.field(1).name(), "date");
        assert_eq!(schema.field(2).name(), "market_price");
    }

    #[test]
    fn test_days_since_epoch() {
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()), 1);
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1969, 12, 31).unwrap()), -1);
    }

    #[test]
    fn test_write_and_read_price_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("prices.parquet");
        let rows = vec![
            PriceRow::new("sv2a_151_charizard_ex", day(20), dec!(246.34)),
            PriceRow::new("sv2a_151_charizard_ex", day(21), dec!(245.50)),
            PriceRow::new("sv2a_151_mew_ex", day(20), dec!(58.10)),
        ];

        ParquetWriter::new(&path).write_price_rows(&rows).unwrap();
        let read = ParquetReader::new(&path).read_price_rows().unwrap();

        assert_eq!(read, rows);
    }

    #[test]
    fn test_read_float_prices_and_string_dates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("features.parquet");
        let schema = Schema::new(vec![
            Field::new("card_id", DataType::Utf8, false),
            Field::new("card_name", DataType::Utf8, true),
            Field::new("date", DataType::Utf8, false),
            Field::new("market_price", DataType::Float64, false),
        ]);
        write_batch(
            &path,
            schema,
            vec![
                Arc::new(StringArray::from(vec!["card_1", "card_1"])) as ArrayRef,
                Arc::new(StringArray::from(vec![Some("Card 1"), None])) as ArrayRef,
                Arc::new(StringArray::from(vec!["2025-11-20", "2025-11-21"])) as ArrayRef,
                Arc::new(Float64Array::from(vec![100.0, 105.25])) as ArrayRef,
            ],
        );

        let rows = ParquetReader::new(&path).read_price_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, day(20));
        assert_eq!(rows[1].market_price, dec!(105.25));
    }

    #[test]
    fn test_missing_column() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.parquet");
        let schema = Schema::new(vec![
            Field::new("card_id", DataType::Utf8, false),
            Field::new("date", DataType::Date32, false),
        ]);
        write_batch(
            &path,
            schema,
            vec![
                Arc::new(StringArray::from(vec!["card_1"])) as ArrayRef,
                Arc::new(Date32Array::from(vec![days_since_epoch(day(20))])),
            ],
        );

        let err = ParquetReader::new(&path).read_price_rows().unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn("market_price")));
    }

    #[test]
    fn test_null_price_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nulls.parquet");
        let schema = Schema::new(vec![
            Field::new("card_id", DataType::Utf8, false),
            Field::new("date", DataType::Date32, false),
            Field::new("market_price", DataType::Float64, true),
        ]);
        write_batch(
            &path,
            schema,
            vec![
                Arc::new(StringArray::from(vec!["card_1", "card_1"])) as ArrayRef,
                Arc::new(Date32Array::from(vec![
                    days_since_epoch(day(20)),
                    days_since_epoch(day(21)),
                ])),
                Arc::new(Float64Array::from(vec![Some(1.0), None])) as ArrayRef,
            ],
        );

        let err = ParquetReader::new(&path).read_price_rows().unwrap_err();
        assert!(matches!(
            err,
            DatasetError::NullValue { column: "market_price", row: 1 }
        ));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = ParquetReader::new("/nonexistent/prices.parquet").read_price_rows();
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }
}
