//! Stream compression for the row-oriented output formats.
//!
//! CSV and JSON Lines outputs are compressed when the output path ends in a
//! codec extension:
//! - **Gzip** (`.gz`, `.gzip`) via `flate2` (feature: `compression-gzip`)
//! - **Zstd** (`.zst`, `.zstd`) via `zstd` (feature: `compression-zstd`)
//!
//! Parquet files carry their own page compression (see
//! [`ParquetCompression`](crate::io::parquet::ParquetCompression)) and never
//! go through this module.

use anyhow::{Result, bail};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

/// Stream codec selected from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    None,
    Gzip,
    Zstd,
}

impl Codec {
    const GZIP_EXTENSIONS: &'static [&'static str] = &[".gz", ".gzip"];
    const ZSTD_EXTENSIONS: &'static [&'static str] = &[".zst", ".zstd"];

    /// Detect the codec from the path's final extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        if Self::GZIP_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            Self::Gzip
        } else if Self::ZSTD_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            Self::Zstd
        } else {
            Self::None
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Zstd => "zstd",
        }
    }

    /// Strip this codec's extension from a lowercased file name, if present.
    pub(crate) fn strip_extension(self, name: &str) -> &str {
        let exts: &[&str] = match self {
            Self::None => &[],
            Self::Gzip => Self::GZIP_EXTENSIONS,
            Self::Zstd => Self::ZSTD_EXTENSIONS,
        };
        exts.iter()
            .find_map(|ext| name.strip_suffix(ext))
            .unwrap_or(name)
    }

    /// Wrap an output stream with this codec's encoder.
    ///
    /// The returned writer must be closed with [`CodecWriter::finish`]; a
    /// compressed stream dropped without it may lose its trailer.
    ///
    /// # Errors
    ///
    /// Returns an error if the codec was not compiled in or the encoder cannot
    /// be created.
    pub fn wrap_writer<W: Write>(self, inner: W) -> Result<CodecWriter<W>> {
        match self {
            Self::None => Ok(CodecWriter::Plain(inner)),
            #[cfg(feature = "compression-gzip")]
            Self::Gzip => Ok(CodecWriter::Gzip(flate2::write::GzEncoder::new(
                inner,
                flate2::Compression::default(),
            ))),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd => Ok(CodecWriter::Zstd(zstd::stream::write::Encoder::new(
                inner, 3,
            )?)),
            #[allow(unreachable_patterns)]
            other => bail!("{} compression support is not enabled", other.name()),
        }
    }

    /// Wrap an opened file with this codec's decoder.
    ///
    /// # Errors
    ///
    /// Returns an error if the codec was not compiled in or the decoder cannot
    /// be created.
    pub fn wrap_reader(self, file: File) -> Result<Box<dyn Read>> {
        let r = BufReader::new(file);
        match self {
            Self::None => Ok(Box::new(r)),
            #[cfg(feature = "compression-gzip")]
            Self::Gzip => Ok(Box::new(flate2::read::GzDecoder::new(r))),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd => Ok(Box::new(zstd::stream::read::Decoder::with_buffer(r)?)),
            #[allow(unreachable_patterns)]
            other => bail!("{} compression support is not enabled", other.name()),
        }
    }
}

/// An output stream, optionally compressed.
pub enum CodecWriter<W: Write> {
    Plain(W),
    #[cfg(feature = "compression-gzip")]
    Gzip(flate2::write::GzEncoder<W>),
    #[cfg(feature = "compression-zstd")]
    Zstd(zstd::stream::write::Encoder<'static, W>),
}

impl<W: Write> CodecWriter<W> {
    /// Write the codec trailer, flush, and hand back the inner stream.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while completing the stream.
    pub fn finish(self) -> io::Result<W> {
        let mut inner = match self {
            Self::Plain(w) => w,
            #[cfg(feature = "compression-gzip")]
            Self::Gzip(enc) => enc.finish()?,
            #[cfg(feature = "compression-zstd")]
            Self::Zstd(enc) => enc.finish()?,
        };
        inner.flush()?;
        Ok(inner)
    }
}

impl<W: Write> Write for CodecWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            #[cfg(feature = "compression-gzip")]
            Self::Gzip(w) => w.write(buf),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            #[cfg(feature = "compression-gzip")]
            Self::Gzip(w) => w.flush(),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd(w) => w.flush(),
        }
    }
}
