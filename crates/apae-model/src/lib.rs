//! Data model for converting assistido spreadsheet exports into SQL.
//!
//! The types here are shared by ingestion, transformation and SQL assembly:
//! raw records as read from the export, normalized SQL values, the ordered
//! destination column list, the city lookup resource and the conversion report.

pub mod cell;
pub mod error;
pub mod fold;
pub mod literal;
pub mod lookup;
pub mod options;
pub mod report;
pub mod table;
pub mod warning;

pub use cell::{CellValue, RawRecord};
pub use error::{ModelError, Result};
pub use fold::{fold_accents, fold_key};
pub use literal::{NormalizedField, SqlLiteral, quote_text};
pub use lookup::CityLookupTable;
pub use options::{ConversionOptions, UnmatchedBoolean};
pub use report::{
    ConversionReport, DEFAULT_WARNING_LIMIT, ReportSummary, RowWarning, WarningDetail,
};
pub use table::{Column, OutputRow, TargetTable};
pub use warning::FieldWarning;
