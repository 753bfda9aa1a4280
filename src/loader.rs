//! The corpus loader: enumerate → parse → assemble → write.
//!
//! [`load_corpus`] does everything up to the in-memory [`Dataset`];
//! [`run`] additionally writes the dataset (and optionally the discard
//! report). The pass is sequential: each file is read and released before the
//! next one is opened, and nothing is written until every file has been seen.

use crate::category::CategoryRule;
use crate::corpus::enumerate_files;
use crate::dataset::{Dataset, build_dataset};
use crate::io::{OutputFormat, WriteOptions, write_dataset};
use crate::posting::{Decoding, ParseOptions, parse_posting};
use crate::report::DiscardReport;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[cfg(feature = "io-parquet")]
use crate::io::ParquetCompression;

/// Everything a loader run needs.
///
/// ```no_run
/// use newsloader::{CategoryRule, LoaderConfig, run};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = LoaderConfig::new("data/raw/20_newsgroups", "data/processed/news.parquet")
///     .with_category_rule(CategoryRule::ParentDir)
///     .with_report_path("data/processed/discards.json");
/// let summary = run(&config)?;
/// println!("{} rows", summary.rows_written);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub parse: ParseOptions,
    pub write: WriteOptions,
    /// Where to write the discard report as JSON, if anywhere.
    pub report_path: Option<PathBuf>,
}

impl LoaderConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_path: output_path.into(),
            parse: ParseOptions::default(),
            write: WriteOptions::default(),
            report_path: None,
        }
    }

    #[must_use]
    pub fn with_category_rule(mut self, rule: CategoryRule) -> Self {
        self.parse.category_rule = rule;
        self
    }

    #[must_use]
    pub fn with_decoding(mut self, decoding: Decoding) -> Self {
        self.parse.decoding = decoding;
        self
    }

    /// Force an output format instead of inferring it from the output path.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.write.format = Some(format);
        self
    }

    #[cfg(feature = "io-parquet")]
    #[must_use]
    pub fn with_parquet_compression(mut self, compression: ParquetCompression) -> Self {
        self.write.parquet_compression = compression;
        self
    }

    #[must_use]
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }
}

/// Result of [`load_corpus`]: the rows that parsed and an account of those that didn't.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub report: DiscardReport,
}

/// Result of [`run`].
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub format: OutputFormat,
    pub rows_written: usize,
    pub report: DiscardReport,
}

/// Enumerate and parse every file under `input_dir` into a [`Dataset`].
///
/// Files that fail to parse are skipped and recorded in the returned
/// [`DiscardReport`]; they never abort the pass.
///
/// # Errors
///
/// Returns an error only if the corpus root cannot be enumerated.
pub fn load_corpus(input_dir: impl AsRef<Path>, options: &ParseOptions) -> Result<LoadOutcome> {
    let input_dir = input_dir.as_ref();
    info!(root = %input_dir.display(), "enumerating and parsing postings");
    let files = enumerate_files(input_dir)?;

    let mut postings = Vec::with_capacity(files.len());
    let mut report = DiscardReport::new();
    for path in files {
        match parse_posting(&path, options) {
            Ok(posting) => {
                report.record_row();
                postings.push(posting);
            }
            Err(failure) => {
                debug!(path = %path.display(), %failure, "discarding posting");
                report.record_discard(path, failure);
            }
        }
    }

    info!(rows = postings.len(), "assembling dataset");
    Ok(LoadOutcome {
        dataset: build_dataset(postings),
        report,
    })
}

/// Run the whole loader: load the corpus, write the dataset, and write the
/// discard report if a path was configured.
///
/// # Errors
///
/// Returns an error if the corpus cannot be enumerated or either output
/// cannot be written. Per-file parse failures are not errors.
pub fn run(config: &LoaderConfig) -> Result<RunSummary> {
    info!(
        input = %config.input_dir.display(),
        output = %config.output_path.display(),
        "building dataset from raw postings"
    );
    let LoadOutcome { dataset, report } = load_corpus(&config.input_dir, &config.parse)?;

    let format = config.write.resolve_format(&config.output_path);
    info!(%format, path = %config.output_path.display(), "writing dataset");
    let rows_written = write_dataset(&dataset, &config.output_path, &config.write)
        .with_context(|| format!("write dataset to {}", config.output_path.display()))?;

    if let Some(report_path) = &config.report_path {
        report.write_to_file(report_path)?;
        debug!(path = %report_path.display(), "wrote discard report");
    }

    if report.is_clean() {
        info!(rows = rows_written, files = report.files_seen(), "dataset complete");
    } else {
        warn!(
            rows = rows_written,
            files = report.files_seen(),
            discarded = report.discard_count(),
            "dataset complete with discarded postings"
        );
    }

    Ok(RunSummary {
        output_path: config.output_path.clone(),
        format,
        rows_written,
        report,
    })
}
