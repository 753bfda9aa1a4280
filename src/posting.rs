//! Parsing of single newsgroup postings.
//!
//! A posting is a plain-text file with a header block, a blank line and a
//! body. Parsing is deliberately naive:
//!
//! - the **body** is everything after the first `"\n\n"`;
//! - the **subject** is the text after the first `"\nSubject: "` up to the
//!   next newline;
//! - the **category** comes from the file's path via a [`CategoryRule`].
//!
//! Every way a file can fail is a [`ParseFailure`] variant, so callers can
//! keep going past bad files without losing track of why they were skipped.

use crate::category::CategoryRule;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Separator between the header block and the body.
pub const BODY_SEPARATOR: &str = "\n\n";

/// Marker preceding the subject text. The leading newline means a `Subject:`
/// header on the very first line is not recognised.
pub const SUBJECT_MARKER: &str = "\nSubject: ";

/// One successfully parsed posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub path: PathBuf,
    pub body: String,
    pub subject: String,
    pub category: String,
}

/// Why a file did not produce a posting.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "cause", rename_all = "snake_case")]
pub enum ParseFailure {
    #[error("cannot read file: {message}")]
    Unreadable { message: String },
    #[error("content is not valid UTF-8")]
    Undecodable,
    #[error("no blank line separating header from body")]
    MissingBodySeparator,
    #[error("no `Subject: ` header line")]
    MissingSubject,
    #[error("cannot derive category using the {rule} rule")]
    MissingCategory { rule: String },
}

/// How raw file bytes are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decoding {
    /// Invalid UTF-8 fails the file with [`ParseFailure::Undecodable`].
    #[default]
    Strict,
    /// Invalid sequences are replaced with U+FFFD.
    Lossy,
}

/// Knobs for [`parse_posting`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub category_rule: CategoryRule,
    pub decoding: Decoding,
}

/// Read and parse the posting at `path`.
///
/// The file is read in one go and its handle dropped before parsing starts.
///
/// # Errors
///
/// Returns the [`ParseFailure`] describing the first problem found.
pub fn parse_posting(path: &Path, options: &ParseOptions) -> Result<Posting, ParseFailure> {
    let bytes = fs::read(path).map_err(|e| ParseFailure::Unreadable {
        message: e.to_string(),
    })?;
    let text = decode(&bytes, options.decoding)?;
    parse_text(&text, path, options.category_rule)
}

/// Parse already-decoded posting text that was read from `path`.
///
/// Line endings are normalised first, so CRLF files split the same way as LF
/// files.
///
/// # Errors
///
/// Returns [`ParseFailure::MissingBodySeparator`], [`ParseFailure::MissingSubject`]
/// or [`ParseFailure::MissingCategory`], checked in that order.
pub fn parse_text(text: &str, path: &Path, rule: CategoryRule) -> Result<Posting, ParseFailure> {
    let text = normalize_newlines(text);

    let (_, body) = text
        .split_once(BODY_SEPARATOR)
        .ok_or(ParseFailure::MissingBodySeparator)?;

    let (_, after_marker) = text
        .split_once(SUBJECT_MARKER)
        .ok_or(ParseFailure::MissingSubject)?;
    let subject = after_marker
        .split_once('\n')
        .map_or(after_marker, |(line, _)| line);

    let category = rule.derive(path).ok_or_else(|| ParseFailure::MissingCategory {
        rule: rule.to_string(),
    })?;

    Ok(Posting {
        path: path.to_path_buf(),
        body: body.to_owned(),
        subject: subject.to_owned(),
        category,
    })
}

fn decode(bytes: &[u8], decoding: Decoding) -> Result<Cow<'_, str>, ParseFailure> {
    match decoding {
        Decoding::Strict => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|_| ParseFailure::Undecodable),
        Decoding::Lossy => Ok(String::from_utf8_lossy(bytes)),
    }
}

// Universal newlines: "\r\n" and lone "\r" both become "\n".
fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
