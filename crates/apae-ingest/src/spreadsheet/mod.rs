//! Spreadsheet export reading.

mod encoding;
mod header;
mod reader;

pub use encoding::{DecodedText, decode_bytes};
pub use header::{CsvHeaders, DELIMITER_CANDIDATES, detect_delimiter, detect_header};
pub use reader::{
    CsvTable, HEADER_PROBE_LINES, MAX_CSV_FILE_SIZE, ReadOptions, check_file_size_with_limit,
    parse_records, read_records,
};
