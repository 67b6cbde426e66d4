//! Error types for metadata ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading raw metadata files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Expected input file is absent.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or parse a delimited file.
    #[error("failed to read {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A record could not be mapped onto the entity's columns.
    #[error("malformed record at line {line} of {path}: {source}")]
    Record {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// The key column of the entity is absent from the header.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
