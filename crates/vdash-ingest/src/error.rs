//! Error types for survey data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the survey table.
///
/// Per-cell numeric coercion failure is deliberately absent: an
/// unparseable cell becomes a missing value and never aborts a load.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Default data file missing or unreadable; the caller falls back to
    /// requesting an uploaded file.
    #[error("data source not available: {path}")]
    SourceUnavailable { path: PathBuf },

    /// Table has zero rows or zero columns after loading. Terminal for
    /// the interaction; the user must supply a new source.
    #[error("no valid data in {path}: table has zero rows or zero columns")]
    EmptyData { path: PathBuf },

    /// Upload is not a CSV file. Detected from the extension before any
    /// content is read; there is no partial load.
    #[error("unsupported upload format '{extension}' for {path}: only CSV files are accepted")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Failed to parse the CSV body.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
