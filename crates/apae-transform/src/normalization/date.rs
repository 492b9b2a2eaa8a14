//! Date fields.

use apae_model::{CellValue, FieldWarning, NormalizedField, SqlLiteral};
use chrono::NaiveDate;

use super::{Conversion, cell_text};
use crate::error::FieldError;

/// Accepted input formats, tried in order. Day/month/year comes first because
/// it is how the record system exports dates.
pub const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y"];

/// Parses a date with the first matching format.
///
/// The year must be written with four digits: `%Y` alone would read
/// "01/02/90" as the year 90.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .filter(|format| has_full_year(trimmed, format))
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Whether the digit run in the year position of `format` is four digits long.
fn has_full_year(text: &str, format: &str) -> bool {
    let mut runs = text.split(|ch: char| !ch.is_ascii_digit());
    let year = if format.starts_with("%Y") {
        runs.next()
    } else {
        runs.next_back()
    };
    year.is_some_and(|digits| digits.len() == 4)
}

/// Converts a cell to a date literal; unparseable text becomes `null` with a
/// warning naming the text.
pub fn normalize_date(cell: &CellValue) -> Result<Conversion, FieldError> {
    let Some(text) = cell_text(cell)? else {
        return Ok(Conversion::null());
    };
    let text = text.trim();
    Ok(match parse_date(text) {
        Some(date) => Conversion::ok(SqlLiteral::Date(date)),
        None => Conversion::degraded(
            NormalizedField::Null,
            FieldWarning::UnparsableDate {
                value: text.to_string(),
            },
        ),
    })
}
