//! On-disk corpus builder.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fixtures::{SamplePosting, posting_text};

/// Fluent builder that writes postings into a temporary corpus tree.
///
/// Files land at `<tempdir>/<prefix...>/<category>/<name>`. The prefix
/// segments (empty by default) let tests reproduce deeper layouts such as
/// `raw/20_newsgroups/<category>/<name>`.
pub struct CorpusBuilder {
    dir: TempDir,
    prefix: PathBuf,
}

impl CorpusBuilder {
    /// Start a builder backed by a fresh temporary directory.
    ///
    /// # Errors
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir().context("create temporary corpus directory")?,
            prefix: PathBuf::new(),
        })
    }

    /// Nest every posting under `segment` (may be called repeatedly).
    #[must_use]
    pub fn with_prefix(mut self, segment: impl AsRef<Path>) -> Self {
        self.prefix.push(segment);
        self
    }

    /// Write a well-formed posting.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn add_posting(self, category: &str, name: &str, subject: &str, body: &str) -> Result<Self> {
        self.add_raw(category, name, posting_text(subject, body).as_bytes())
    }

    /// Write every fixture in `samples`.
    ///
    /// # Errors
    /// Returns an error if any file cannot be written.
    pub fn add_samples(self, samples: &[SamplePosting]) -> Result<Self> {
        samples.iter().try_fold(self, |b, s| {
            b.add_raw(s.category, s.name, s.content().as_bytes())
        })
    }

    /// Write arbitrary bytes as a posting file.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be created.
    pub fn add_raw(self, category: &str, name: &str, content: &[u8]) -> Result<Self> {
        let dir = self.dir.path().join(&self.prefix).join(category);
        fs::create_dir_all(&dir).with_context(|| format!("mkdir -p {}", dir.display()))?;
        let file = dir.join(name);
        fs::write(&file, content).with_context(|| format!("write {}", file.display()))?;
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> TestCorpus {
        let root = self.dir.path().join(&self.prefix);
        TestCorpus {
            dir: self.dir,
            root,
        }
    }
}

/// A corpus on disk; deleted when dropped.
pub struct TestCorpus {
    dir: TempDir,
    root: PathBuf,
}

impl TestCorpus {
    /// Directory to hand to the loader (the temp dir plus any prefix).
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The temporary directory itself, above any prefix.
    #[must_use]
    pub fn base(&self) -> &Path {
        self.dir.path()
    }
}
