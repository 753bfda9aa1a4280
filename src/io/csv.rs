//! CSV I/O with Serde.
//!
//! - [`write_csv_vec`] writes a header row followed by one record per element.
//! - [`read_csv_vec`] reads a headered file back into `Vec<T>`.
//!
//! Multi-line fields (message bodies) are quoted by the `csv` writer and
//! survive a round trip. Paths ending in `.gz` / `.zst` are transparently
//! (de)compressed via [`Codec`].

use crate::io::compression::Codec;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a typed slice to a headered CSV file, replacing any existing file.
///
/// The parent directory must already exist.
///
/// # Returns
/// The number of rows written (i.e., `data.len()`).
///
/// # Errors
/// Returns an error if the file cannot be created or any row fails to
/// serialize/flush.
pub fn write_csv_vec<T: Serialize>(path: impl AsRef<Path>, data: &[T]) -> Result<usize> {
    let path = path.as_ref();
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let w = Codec::from_path(path)
        .wrap_writer(BufWriter::new(f))
        .with_context(|| format!("setup compression for {}", path.display()))?;
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(w);
    for (i, row) in data.iter().enumerate() {
        wtr.serialize(row)
            .with_context(|| format!("serialize CSV row #{}", i + 1))?;
    }
    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("flush CSV writer: {}", e.error()))?
        .finish()
        .with_context(|| format!("finish {}", path.display()))?;
    Ok(data.len())
}

/// Read a headered CSV file into a typed `Vec<T>`.
///
/// # Errors
/// Returns an error if the file cannot be opened or if any record fails to
/// deserialize into `T`. Errors carry the record number.
pub fn read_csv_vec<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let rdr = Codec::from_path(path)
        .wrap_reader(f)
        .with_context(|| format!("setup decompression for {}", path.display()))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(rdr);
    let mut out = Vec::<T>::new();
    for (i, rec) in rdr.deserialize::<T>().enumerate() {
        let v = rec.with_context(|| format!("parse CSV record #{} in {}", i + 1, path.display()))?;
        out.push(v);
    }
    Ok(out)
}
