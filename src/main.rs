use anyhow::Result;
use clap::Parser;
use newsloader::{CategoryRule, Decoding, LoaderConfig, OutputFormat, run};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "io-parquet")]
use newsloader::ParquetCompression;

/// Turn raw newsgroup postings (INPUT_DIR) into a cleaned Message/Subject/Category
/// dataset (OUTPUT_FILE).
#[derive(Debug, Parser)]
#[command(name = "newsloader", version, about)]
struct Args {
    /// Corpus root; must exist.
    input_dir: PathBuf,

    /// Destination file; overwritten if present. Its parent directory must exist.
    output_file: PathBuf,

    /// Take the category from this 0-based segment of the file path instead of
    /// the parent directory name.
    #[arg(long, env = "NEWSLOADER_CATEGORY_SEGMENT", value_name = "N")]
    category_segment: Option<usize>,

    /// Replace invalid UTF-8 instead of discarding the posting.
    #[arg(long, env = "NEWSLOADER_LOSSY")]
    lossy: bool,

    /// Output format; inferred from OUTPUT_FILE's extension when omitted.
    #[arg(long, env = "NEWSLOADER_FORMAT", value_parser = clap::value_parser!(OutputFormat))]
    format: Option<OutputFormat>,

    /// Parquet page compression: snappy, zstd, gzip or none.
    #[cfg(feature = "io-parquet")]
    #[arg(
        long,
        env = "NEWSLOADER_COMPRESSION",
        default_value = "snappy",
        value_parser = clap::value_parser!(ParquetCompression)
    )]
    compression: ParquetCompression,

    /// Write the list of discarded files, with reasons, as JSON.
    #[arg(long, env = "NEWSLOADER_REPORT", value_name = "PATH")]
    report: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> LoaderConfig {
        let rule = self
            .category_segment
            .map_or(CategoryRule::ParentDir, CategoryRule::PathSegment);
        let decoding = if self.lossy {
            Decoding::Lossy
        } else {
            Decoding::Strict
        };

        let mut config = LoaderConfig::new(self.input_dir, self.output_file)
            .with_category_rule(rule)
            .with_decoding(decoding);
        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        #[cfg(feature = "io-parquet")]
        {
            config = config.with_parquet_compression(self.compression);
        }
        if let Some(report) = self.report {
            config = config.with_report_path(report);
        }
        config
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // A missing .env is fine; values from it only feed the NEWSLOADER_* flags and RUST_LOG.
    dotenv::dotenv().ok();
    init_tracing();

    let config = Args::parse().into_config();
    let summary = run(&config)?;
    tracing::info!(
        rows = summary.rows_written,
        discarded = summary.report.discard_count(),
        format = %summary.format,
        "wrote {}",
        summary.output_path.display()
    );
    Ok(())
}
