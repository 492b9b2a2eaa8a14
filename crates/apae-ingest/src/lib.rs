//! Spreadsheet ingestion for the assistido migration.
//!
//! # Features
//!
//! - **CSV Loading**: decode exports in UTF-8, UTF-16 or Windows-1252, detect
//!   the delimiter and the header row under a decorative title line
//! - **Input Discovery**: resolve a file or a directory holding one CSV
//! - **City Tables**: load the municipality lookup table from a file, or use
//!   the embedded default
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use apae_ingest::{ReadOptions, default_city_table, read_records, resolve_input};
//!
//! let input = resolve_input(Path::new("exports/"))?;
//! let table = read_records(&input, &ReadOptions::default())?;
//! let cities = default_city_table()?;
//! ```

mod cities;
mod discovery;
mod error;
mod spreadsheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use spreadsheet::{
    CsvHeaders, CsvTable, DELIMITER_CANDIDATES, DecodedText, HEADER_PROBE_LINES,
    MAX_CSV_FILE_SIZE, ReadOptions, check_file_size_with_limit, decode_bytes, detect_delimiter,
    detect_header, parse_records, read_records,
};

// === File Discovery ===
pub use discovery::{list_csv_files, resolve_input};

// === City Tables ===
pub use cities::{DEFAULT_CITY_TABLE, default_city_table, load_city_table, parse_city_table};
