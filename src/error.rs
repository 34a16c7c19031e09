//! Error types for dataset preparation.
//!
//! Every fallible operation in the crate returns [`Result`]. Failures are
//! fatal for the whole build: there is no skip-and-continue policy, a bad
//! record or an empty split aborts the call that produced it.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Errors produced while building a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The input file could not be opened or read.
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        /// Path of the file that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the file or one of its rows.
    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    /// A required header column is absent from the CSV file.
    #[error("missing required column `{column}` in {path}")]
    MissingColumn {
        /// Name of the absent column
        column: &'static str,
        /// File that was inspected
        path: PathBuf,
    },

    /// A train/test split ended up with no usable records.
    #[error("dataset split `{split}` contains no records ({context})")]
    EmptyDataset {
        /// Split name, "train" or "test"
        split: &'static str,
        /// What produced the empty split
        context: String,
    },

    /// An embedding row's width doesn't match the configured vector size.
    #[error("embedding vector length ({actual}) doesn't match configured vector_size ({expected})")]
    VectorSizeMismatch {
        /// Configured `vector_size`
        expected: usize,
        /// Length of the offending embedding row
        actual: usize,
    },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be serialized or parsed.
    #[error("configuration file error: {0}")]
    ConfigFile(String),

    /// A tensor or metadata file could not be written.
    #[error("export failed: {0}")]
    Export(String),
}

impl DatasetError {
    /// Build a [`DatasetError::Io`] from a path and source error.
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`DatasetError::EmptyDataset`] for a named split.
    pub fn empty(split: &'static str, context: impl Into<String>) -> Self {
        Self::EmptyDataset {
            split,
            context: context.into(),
        }
    }
}
