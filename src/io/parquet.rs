//! Parquet I/O powered by Serde + Arrow + Parquet.
//!
//! - [`write_parquet_vec`] writes a typed slice as one Parquet file.
//! - [`read_parquet_vec`] reads a whole file back into `Vec<T>`.
//! - [`read_parquet_column_names`] inspects the stored schema.
//!
//! The Arrow schema is traced from `T` with `serde_arrow`, so struct field
//! names (after `#[serde(rename)]`) become column names and field order
//! becomes column order. String fields are stored as Arrow `LargeUtf8`.

use anyhow::{Context, Result, bail};
use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use serde::{Serialize, de::DeserializeOwned};
use serde_arrow::schema::{SchemaLike, TracingOptions};
use serde_arrow::{from_record_batch, to_record_batch};
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// Page compression used inside the Parquet file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParquetCompression {
    #[default]
    Snappy,
    Zstd,
    Gzip,
    None,
}

impl ParquetCompression {
    fn codec(self) -> Compression {
        match self {
            Self::Snappy => Compression::SNAPPY,
            Self::Zstd => Compression::ZSTD(ZstdLevel::default()),
            Self::Gzip => Compression::GZIP(GzipLevel::default()),
            Self::None => Compression::UNCOMPRESSED,
        }
    }
}

impl FromStr for ParquetCompression {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "snappy" => Ok(Self::Snappy),
            "zstd" => Ok(Self::Zstd),
            "gzip" => Ok(Self::Gzip),
            "none" | "uncompressed" => Ok(Self::None),
            other => bail!("unknown parquet compression `{other}` (expected snappy, zstd, gzip or none)"),
        }
    }
}

impl fmt::Display for ParquetCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Snappy => "snappy",
            Self::Zstd => "zstd",
            Self::Gzip => "gzip",
            Self::None => "none",
        })
    }
}

/// Write a typed slice to a Parquet file, replacing any existing file.
///
/// The schema is inferred from `T`, so an empty slice still produces a valid
/// file with the full schema and zero rows. The parent directory must exist.
///
/// # Returns
/// Number of rows written (`data.len()`).
///
/// # Errors
/// An error is returned if schema inference, conversion, file creation, or
/// writing fails.
pub fn write_parquet_vec<T: Serialize + DeserializeOwned>(
    path: impl AsRef<Path>,
    data: &[T],
    compression: ParquetCompression,
) -> Result<usize> {
    let path = path.as_ref();

    let fields: Vec<FieldRef> = Vec::<FieldRef>::from_type::<T>(TracingOptions::default())
        .context("infer Arrow schema from row type")?;
    let batch: RecordBatch =
        to_record_batch(&fields, &data).context("convert rows to RecordBatch")?;

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let props = WriterProperties::builder()
        .set_compression(compression.codec())
        .build();
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), Some(props)).context("create ArrowWriter")?;
    writer.write(&batch).context("write batch to parquet")?;
    writer.close().context("close ArrowWriter")?;

    Ok(data.len())
}

/// Read a Parquet file into a typed `Vec<T>`.
///
/// # Errors
/// Returns an error if the file cannot be opened, the reader cannot be built,
/// batch iteration fails, or conversion to `T` fails.
pub fn read_parquet_vec<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("open ParquetRecordBatchReader")?
        .with_batch_size(64 * 1024)
        .build()
        .context("build ParquetRecordBatchReader")?;

    let mut out: Vec<T> = Vec::new();
    for batch in reader {
        let batch = batch.context("read next batch")?;
        let mut rows: Vec<T> =
            from_record_batch(&batch).context("deserialize RecordBatch rows")?;
        out.append(&mut rows);
    }
    Ok(out)
}

/// Column names stored in a Parquet file's Arrow schema, in order.
///
/// # Errors
/// Returns an error if the file cannot be opened or its metadata read.
pub fn read_parquet_column_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("open ParquetRecordBatchReader")?;
    Ok(builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect())
}
