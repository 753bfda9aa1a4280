//! # newsloader
//!
//! Turns a directory tree of newsgroup postings into a three-column table
//! (`Message`, `Subject`, `Category`) and writes it as Parquet (or CSV /
//! JSON Lines).
//!
//! ## Pipeline
//!
//! One sequential pass:
//!
//! 1. [`enumerate_files`] lists every regular file under the corpus root.
//! 2. [`parse_posting`] splits each file into body and subject and derives a
//!    category from its path. Failures are typed ([`ParseFailure`]) and
//!    collected into a [`DiscardReport`] instead of aborting the run.
//! 3. [`build_dataset`] assembles the successful postings into a [`Dataset`].
//! 4. [`write_dataset`] serializes it.
//!
//! [`load_corpus`] bundles steps 1–3 and [`run`] drives the whole thing from a
//! [`LoaderConfig`].
//!
//! ## Parsing rules
//!
//! - **Message**: everything after the first blank line (`"\n\n"`).
//! - **Subject**: the text after the first `"\nSubject: "`, up to the next newline.
//! - **Category**: by default the posting's parent directory name; see
//!   [`CategoryRule`] for the positional alternative.
//!
//! ## Example
//!
//! ```no_run
//! use newsloader::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let outcome = load_corpus("data/raw/20_newsgroups", &ParseOptions::default())?;
//! println!("{}", outcome.report);
//!
//! write_dataset(&outcome.dataset, "data/processed/news.parquet", &WriteOptions::default())?;
//! let back = read_dataset("data/processed/news.parquet")?;
//! assert_eq!(back.len(), outcome.dataset.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `io-parquet` - Parquet output (Arrow + serde_arrow)
//! - `io-csv` - CSV output
//! - `io-jsonl` - JSON Lines output
//! - `compression-gzip` / `compression-zstd` - `.gz` / `.zst` row-oriented outputs

pub mod category;
pub mod corpus;
pub mod dataset;
pub mod io;
pub mod loader;
pub mod posting;
pub mod report;
pub mod testing;

pub use category::CategoryRule;
pub use corpus::enumerate_files;
pub use dataset::{Dataset, DatasetRow, build_dataset};
pub use io::{OutputFormat, WriteOptions, read_dataset, write_dataset};
pub use loader::{LoadOutcome, LoaderConfig, RunSummary, load_corpus, run};
pub use posting::{Decoding, ParseFailure, ParseOptions, Posting, parse_posting, parse_text};
pub use report::{Discard, DiscardReport};

#[cfg(feature = "io-parquet")]
pub use io::ParquetCompression;
#[cfg(feature = "io-parquet")]
pub use io::parquet::{read_parquet_column_names, read_parquet_vec, write_parquet_vec};
#[cfg(feature = "io-csv")]
pub use io::csv::{read_csv_vec, write_csv_vec};
#[cfg(feature = "io-jsonl")]
pub use io::jsonl::{read_jsonl_vec, write_jsonl_vec};
