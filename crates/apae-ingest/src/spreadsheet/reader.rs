//! Spreadsheet export reading: decoding, header detection, records.

use std::path::Path;

use apae_model::{CellValue, RawRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::discovery::sibling_csv_files;
use crate::error::{IngestError, Result};

use super::encoding::decode_bytes;
use super::header::{CsvHeaders, detect_delimiter, detect_header, parse_csv_line};

/// Maximum file size for CSV loading (50 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Number of leading lines searched for the header row.
pub const HEADER_PROBE_LINES: usize = 10;

/// How a spreadsheet export is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Field delimiter; detected from the header line when unset.
    pub delimiter: Option<u8>,
    /// Lines before the header; detected when unset.
    pub skip_rows: Option<usize>,
    /// Header names that identify the header row.
    pub header_markers: Vec<String>,
    pub max_file_size: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            skip_rows: None,
            header_markers: vec!["Nome".to_string(), "nome".to_string()],
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    #[must_use]
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = Some(skip_rows);
        self
    }

    #[must_use]
    pub fn with_header_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

/// A spreadsheet export read into memory.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: CsvHeaders,
    /// Data rows, indexed from 0 in file order.
    pub records: Vec<RawRecord>,
    /// Name of the encoding the file was decoded with.
    pub encoding: &'static str,
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
            candidates: sibling_csv_files(path),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Reads a spreadsheet export from disk.
pub fn read_records(path: &Path, options: &ReadOptions) -> Result<CsvTable> {
    check_file_size_with_limit(path, options.max_file_size)?;
    let bytes = std::fs::read(path).map_err(|e| open_error(path, e))?;
    let decoded = decode_bytes(&bytes);
    let encoding = decoded.encoding.name();
    info!(path = %path.display(), encoding, bytes = bytes.len(), "decoded input file");
    let mut table = parse_records(&decoded.text, path, options)?;
    table.encoding = encoding;
    Ok(table)
}

/// Parses already-decoded export text. `path` only labels errors.
pub fn parse_records(text: &str, path: &Path, options: &ReadOptions) -> Result<CsvTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.lines().collect();
    if lines.iter().all(|line| line.trim().is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let (header_index, delimiter) = match options.skip_rows {
        Some(skip_rows) => {
            let line = lines.get(skip_rows).ok_or_else(|| IngestError::NoHeaderDetected {
                path: path.to_path_buf(),
            })?;
            (skip_rows, options.delimiter.unwrap_or_else(|| detect_delimiter(line)))
        }
        None => detect_header(
            &lines,
            options.delimiter,
            &options.header_markers,
            HEADER_PROBE_LINES,
        )
        .ok_or_else(|| IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        })?,
    };
    if header_index > 0 {
        debug!(skipped = header_index, "skipping lines before header");
    }

    let columns = parse_csv_line(lines[header_index], delimiter);
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    let headers = CsvHeaders {
        columns,
        skip_rows: header_index,
        delimiter,
    };

    let body = &text[line_offset(text, header_index + 1)..];
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    let mut extra_cells = 0usize;
    for result in reader.records() {
        let row = result.map_err(|e| IngestError::csv_parse(path, &e))?;
        if row.len() > headers.len() {
            extra_cells += 1;
        }
        let mut record = RawRecord::new(records.len());
        for (position, label) in headers.columns.iter().enumerate() {
            if label.is_empty() {
                continue;
            }
            let cell = row.get(position).map_or(CellValue::Empty, CellValue::from_export);
            record.push(label.clone(), cell);
        }
        records.push(record);
    }
    if extra_cells > 0 {
        warn!(rows = extra_cells, "rows with more cells than headers, extra cells ignored");
    }

    if records.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    debug!(
        columns = headers.len(),
        rows = records.len(),
        delimiter = %char::from(delimiter),
        "parsed records"
    );

    Ok(CsvTable {
        headers,
        records,
        encoding: "UTF-8",
    })
}

/// Byte offset where physical line `index` starts.
fn line_offset(text: &str, index: usize) -> usize {
    text.split_inclusive('\n').take(index).map(str::len).sum()
}
