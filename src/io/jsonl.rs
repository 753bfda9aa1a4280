//! JSON Lines I/O with Serde: one compact JSON object per line.
//!
//! Empty and whitespace-only lines are skipped on read. Paths ending in
//! `.gz` / `.zst` are transparently (de)compressed via [`Codec`].

use crate::io::compression::Codec;
use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Write a typed slice as a JSONL file, replacing any existing file.
///
/// The parent directory must already exist.
///
/// # Returns
/// The number of items written (`data.len()`).
///
/// # Errors
/// Returns an error if the file cannot be created or any item fails to
/// serialize/flush.
pub fn write_jsonl_vec<T: Serialize>(path: impl AsRef<Path>, data: &[T]) -> Result<usize> {
    let path = path.as_ref();
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = Codec::from_path(path)
        .wrap_writer(BufWriter::new(f))
        .with_context(|| format!("setup compression for {}", path.display()))?;
    for (i, item) in data.iter().enumerate() {
        serde_json::to_writer(&mut w, item)
            .with_context(|| format!("serialize item #{} to {}", i, path.display()))?;
        w.write_all(b"\n")?;
    }
    w.finish()
        .with_context(|| format!("finish {}", path.display()))?;
    Ok(data.len())
}

/// Read a JSONL file into a typed `Vec<T>`.
///
/// # Errors
/// Returns an error if the file cannot be opened or read, or if any line fails
/// to parse into `T`. Errors include the line number.
pub fn read_jsonl_vec<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let rdr = Codec::from_path(path)
        .wrap_reader(f)
        .with_context(|| format!("setup decompression for {}", path.display()))?;
    let mut out = Vec::<T>::new();
    for (i, line) in BufReader::new(rdr).lines().enumerate() {
        let line = line.with_context(|| format!("read line {} in {}", i + 1, path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let v: T = serde_json::from_str(&line)
            .with_context(|| format!("parse JSONL line {} in {}", i + 1, path.display()))?;
        out.push(v);
    }
    Ok(out)
}
