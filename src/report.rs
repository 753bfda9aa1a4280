//! Accounting for files that did not make it into the dataset.
//!
//! Every file the loader looks at either becomes a row or an entry in a
//! [`DiscardReport`]. The report is handed back to the caller at the end of a
//! run and can be printed, logged or exported as JSON.

use crate::posting::ParseFailure;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A file that failed to parse, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discard {
    pub path: PathBuf,
    #[serde(flatten)]
    pub failure: ParseFailure,
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.failure)
    }
}

/// Per-run counters plus the list of discarded files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardReport {
    files_seen: usize,
    rows: usize,
    discards: Vec<Discard>,
}

impl DiscardReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a file that parsed into a row.
    pub fn record_row(&mut self) {
        self.files_seen += 1;
        self.rows += 1;
    }

    /// Count a file that failed, remembering why.
    pub fn record_discard(&mut self, path: impl Into<PathBuf>, failure: ParseFailure) {
        self.files_seen += 1;
        self.discards.push(Discard {
            path: path.into(),
            failure,
        });
    }

    #[must_use]
    pub fn files_seen(&self) -> usize {
        self.files_seen
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn discard_count(&self) -> usize {
        self.discards.len()
    }

    #[must_use]
    pub fn discards(&self) -> &[Discard] {
        &self.discards
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.discards.is_empty()
    }

    /// Number of discards whose failure matches `pred`.
    pub fn count_where(&self, pred: impl Fn(&ParseFailure) -> bool) -> usize {
        self.discards.iter().filter(|d| pred(&d.failure)).count()
    }

    /// Pretty-printed JSON of the whole report.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize discard report")
    }

    /// Write the report as JSON to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))
    }
}

impl fmt::Display for DiscardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files, {} rows, {} discarded",
            self.files_seen,
            self.rows,
            self.discards.len()
        )?;
        for discard in &self.discards {
            write!(f, "\n  {discard}")?;
        }
        Ok(())
    }
}
