//! Error types for spreadsheet ingestion.

use std::path::{Path, PathBuf};

use apae_model::ModelError;
use thiserror::Error;

/// Errors that can occur while locating and reading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// CSV file not found. `candidates` lists the CSV files next to it.
    #[error("CSV file not found: {}{}", path.display(), candidate_hint(candidates))]
    FileNotFound {
        path: PathBuf,
        candidates: Vec<PathBuf>,
    },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Input Discovery Errors ===
    /// Directory given as input holds no CSV file.
    #[error("no CSV file in {path}")]
    NoInputFile { path: PathBuf },

    /// Directory given as input holds several CSV files.
    #[error("several CSV files in {}{}", path.display(), candidate_hint(candidates))]
    AmbiguousInput {
        path: PathBuf,
        candidates: Vec<PathBuf>,
    },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected the file.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty or has no data rows.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Failed to detect the header row.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    // === City Table Errors ===
    /// Required column not found in the city table.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },

    /// City table content rejected by the lookup table.
    #[error("invalid city table {path}: {source}")]
    CityTable {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl IngestError {
    pub(crate) fn csv_parse(path: &Path, error: &csv::Error) -> Self {
        Self::CsvParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}

fn candidate_hint(candidates: &[PathBuf]) -> String {
    if candidates.is_empty() {
        return String::new();
    }
    let names: Vec<String> = candidates
        .iter()
        .map(|path| {
            path.file_name()
                .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
        })
        .collect();
    format!(" (available: {})", names.join(", "))
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
