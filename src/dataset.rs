//! The in-memory `Message` / `Subject` / `Category` table.

use crate::posting::Posting;
use serde::{Deserialize, Serialize};

/// Output column names, in schema order.
pub const COLUMNS: [&str; 3] = ["Message", "Subject", "Category"];

/// One row of the dataset. Field order is the column order of every output format.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DatasetRow {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Category")]
    pub category: String,
}

impl From<Posting> for DatasetRow {
    fn from(posting: Posting) -> Self {
        Self {
            message: posting.body,
            subject: posting.subject,
            category: posting.category,
        }
    }
}

/// Ordered collection of [`DatasetRow`]s.
///
/// Row order is the order postings were handed to [`build_dataset`]; nothing
/// is sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
}

impl Dataset {
    #[must_use]
    pub fn from_rows(rows: Vec<DatasetRow>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<DatasetRow> {
        self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DatasetRow> {
        self.rows.iter()
    }

    /// Rows sorted by `(Message, Subject, Category)`, for order-insensitive comparisons.
    #[must_use]
    pub fn sorted_rows(&self) -> Vec<DatasetRow> {
        let mut rows = self.rows.clone();
        rows.sort();
        rows
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DatasetRow;
    type IntoIter = std::slice::Iter<'a, DatasetRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Assemble a dataset from parsed postings, preserving their order.
#[must_use]
pub fn build_dataset<I>(postings: I) -> Dataset
where
    I: IntoIterator<Item = Posting>,
{
    Dataset {
        rows: postings.into_iter().map(DatasetRow::from).collect(),
    }
}
