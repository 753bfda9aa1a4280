//! Testing utilities for corpus loader runs.
//!
//! - **Fixtures**: canned postings, well-formed and malformed
//! - **Builders**: [`CorpusBuilder`] lays postings out on disk in a temporary
//!   directory so tests can point the loader at a real tree
//!
//! # Quick Start
//!
//! ```no_run
//! use newsloader::testing::*;
//! use newsloader::{ParseOptions, load_corpus};
//!
//! # fn main() -> anyhow::Result<()> {
//! let corpus = CorpusBuilder::new()?
//!     .add_posting("sci.space", "61000", "Moon base", "Let's go back.")?
//!     .add_raw("sci.space", "61001", b"no header here")?
//!     .build();
//!
//! let outcome = load_corpus(corpus.root(), &ParseOptions::default())?;
//! assert_eq!(outcome.dataset.len(), 1);
//! assert_eq!(outcome.report.discard_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod builders;
pub mod fixtures;

pub use builders::{CorpusBuilder, TestCorpus};
pub use fixtures::{SamplePosting, malformed_postings, posting_text, sample_postings};
