//! CSV corpus ingestion.
//!
//! Loads labeled question records from a CSV file with a header row. The
//! file must carry at least an `intent` and a `question` column; any other
//! columns are ignored. Rows are kept in file order so that label-id
//! assignment stays deterministic.

use crate::error::{DatasetError, Result};
use csv::ReaderBuilder;
use std::path::Path;

/// Required label column name.
pub const INTENT_COLUMN: &str = "intent";

/// Required text column name.
pub const QUESTION_COLUMN: &str = "question";

/// One labeled text record, as read from a CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Raw question text
    pub question: String,

    /// Raw intent label
    pub intent: String,
}

/// A loaded corpus: all records of one CSV file, in file order.
#[derive(Debug, Clone)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    /// Load a corpus from a CSV file.
    ///
    /// The header row must contain `intent` and `question` columns (in any
    /// position). Fails with [`DatasetError::MissingColumn`] when either is
    /// absent, or [`DatasetError::Csv`] for unreadable/malformed files.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

        let headers = reader.headers()?.clone();
        let intent_idx = Self::column_index(&headers, INTENT_COLUMN, path)?;
        let question_idx = Self::column_index(&headers, QUESTION_COLUMN, path)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(Record {
                question: row
                    .get(question_idx)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                intent: row.get(intent_idx).unwrap_or_default().trim().to_string(),
            });
        }

        log::info!("loaded {} records from {}", records.len(), path.display());

        Ok(Self { records })
    }

    fn column_index(
        headers: &csv::StringRecord,
        column: &'static str,
        path: &Path,
    ) -> Result<usize> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DatasetError::MissingColumn {
                column,
                path: path.to_path_buf(),
            })
    }

    /// All records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records in the corpus.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the corpus holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The label column, in file order.
    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.intent.as_str())
    }
}
