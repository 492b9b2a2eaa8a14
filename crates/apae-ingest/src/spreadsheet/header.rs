//! Header row detection and normalization.

use apae_model::fold_key;

/// Delimiters probed when none is configured. Semicolon first: the record
/// system exports with semicolons and wins ties.
pub const DELIMITER_CANDIDATES: [u8; 3] = [b';', b',', b'\t'];

/// Result of CSV header analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Normalized column names (trimmed).
    pub columns: Vec<String>,
    /// Number of physical lines before the header (decorative title rows).
    pub skip_rows: usize,
    pub delimiter: u8,
}

impl CsvHeaders {
    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column, compared accent- and case-insensitively.
    pub fn position(&self, column: &str) -> Option<usize> {
        let wanted = fold_key(column);
        self.columns.iter().position(|c| fold_key(c) == wanted)
    }
}

/// Normalizes a header value by trimming whitespace and a stray BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Picks the candidate delimiter occurring most often in `line`.
///
/// Quoted sections are not counted. Ties go to the earlier candidate.
pub fn detect_delimiter(line: &str) -> u8 {
    let mut best = DELIMITER_CANDIDATES[0];
    let mut best_count = 0;
    for candidate in DELIMITER_CANDIDATES {
        let count = count_unquoted(line, candidate);
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for byte in line.bytes() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b if b == delimiter && !in_quotes => count += 1,
            _ => {}
        }
    }
    count
}

/// Parses a single line into fields, handling quoted values.
pub fn parse_csv_line(line: &str, delimiter: u8) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(normalize_header).collect(),
        _ => Vec::new(),
    }
}

/// True when one of the fields of `line` is a header marker.
pub fn is_header_line(line: &str, delimiter: u8, markers: &[String]) -> bool {
    let markers: Vec<String> = markers.iter().map(|marker| fold_key(marker)).collect();
    parse_csv_line(line, delimiter)
        .iter()
        .any(|field| markers.contains(&fold_key(field)))
}

/// Finds the header among the first `max_probe` lines.
///
/// Returns the line index and the delimiter to use with it.
pub fn detect_header(
    lines: &[&str],
    delimiter: Option<u8>,
    markers: &[String],
    max_probe: usize,
) -> Option<(usize, u8)> {
    lines.iter().take(max_probe).enumerate().find_map(|(index, line)| {
        let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(line));
        is_header_line(line, delimiter, markers).then_some((index, delimiter))
    })
}
