//! Dataset serialization.
//!
//! [`write_dataset`] is the single entry point the loader uses; it picks an
//! [`OutputFormat`] (explicit, or inferred from the output file name) and
//! dispatches to the format module. [`read_dataset`] does the reverse and is
//! mainly useful for verification.
//!
//! | extension                       | format  | feature      |
//! |---------------------------------|---------|--------------|
//! | `.csv`, `.csv.gz`, `.csv.zst`   | CSV     | `io-csv`     |
//! | `.jsonl`, `.ndjson` (+ codec)   | JSONL   | `io-jsonl`   |
//! | anything else                   | Parquet | `io-parquet` |

pub mod compression;

#[cfg_attr(docsrs, doc(cfg(feature = "io-jsonl")))]
#[cfg(feature = "io-jsonl")]
pub mod jsonl;

#[cfg_attr(docsrs, doc(cfg(feature = "io-csv")))]
#[cfg(feature = "io-csv")]
pub mod csv;

#[cfg_attr(docsrs, doc(cfg(feature = "io-parquet")))]
#[cfg(feature = "io-parquet")]
pub mod parquet;

use crate::dataset::{Dataset, DatasetRow};
use anyhow::{Result, bail};
use compression::Codec;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[cfg(feature = "io-parquet")]
pub use self::parquet::ParquetCompression;

/// On-disk layout of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Parquet,
    Csv,
    Jsonl,
}

impl OutputFormat {
    /// Infer the format from a file name, ignoring a trailing codec extension.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let stem = Codec::from_path(path).strip_extension(&name);
        if stem.ends_with(".csv") {
            Self::Csv
        } else if stem.ends_with(".jsonl") || stem.ends_with(".ndjson") {
            Self::Jsonl
        } else {
            Self::Parquet
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "parquet" => Ok(Self::Parquet),
            "csv" => Ok(Self::Csv),
            "jsonl" | "ndjson" => Ok(Self::Jsonl),
            other => bail!("unknown output format `{other}` (expected parquet, csv or jsonl)"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
            Self::Jsonl => "jsonl",
        })
    }
}

/// How [`write_dataset`] lays the table out on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Forced format; `None` infers it from the output path.
    pub format: Option<OutputFormat>,
    #[cfg(feature = "io-parquet")]
    pub parquet_compression: ParquetCompression,
}

impl WriteOptions {
    /// The format that will be used for `path`.
    #[must_use]
    pub fn resolve_format(&self, path: impl AsRef<Path>) -> OutputFormat {
        self.format.unwrap_or_else(|| OutputFormat::from_path(path))
    }
}

/// Serialize `dataset` to `path` with columns `Message`, `Subject`, `Category`.
///
/// Any existing file at `path` is overwritten. The parent directory is not
/// created.
///
/// # Returns
/// Number of rows written.
///
/// # Errors
/// Returns an error if the parent directory is missing or unwritable, the
/// selected format was not compiled in, or serialization fails.
pub fn write_dataset(
    dataset: &Dataset,
    path: impl AsRef<Path>,
    options: &WriteOptions,
) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        bail!("output directory {} does not exist", parent.display());
    }

    let rows = dataset.rows();
    match options.resolve_format(path) {
        #[cfg(feature = "io-parquet")]
        OutputFormat::Parquet => parquet::write_parquet_vec(path, rows, options.parquet_compression),
        #[cfg(feature = "io-csv")]
        OutputFormat::Csv => csv::write_csv_vec(path, rows),
        #[cfg(feature = "io-jsonl")]
        OutputFormat::Jsonl => jsonl::write_jsonl_vec(path, rows),
        #[allow(unreachable_patterns)]
        other => bail!("{other} output support is not enabled"),
    }
}

/// Read a dataset written by [`write_dataset`], inferring the format from `path`.
///
/// # Errors
/// Returns an error if the file cannot be read or does not hold
/// `Message`/`Subject`/`Category` rows.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let rows: Vec<DatasetRow> = match OutputFormat::from_path(path) {
        #[cfg(feature = "io-parquet")]
        OutputFormat::Parquet => parquet::read_parquet_vec(path)?,
        #[cfg(feature = "io-csv")]
        OutputFormat::Csv => csv::read_csv_vec(path)?,
        #[cfg(feature = "io-jsonl")]
        OutputFormat::Jsonl => jsonl::read_jsonl_vec(path)?,
        #[allow(unreachable_patterns)]
        other => bail!("{other} input support is not enabled"),
    };
    Ok(Dataset::from_rows(rows))
}
