//! Taxpayer document number (CPF).

use apae_model::{CellValue, NormalizedField, SqlLiteral};

use super::cell_text;
use crate::error::FieldError;

const CPF_DIGITS: usize = 11;

/// Formats complete CPFs as `000.000.000-00`.
///
/// Incomplete numbers (at least one digit but not 11) keep the raw cell
/// text untouched; cells without any digit become `null`.
pub fn normalize_document(cell: &CellValue) -> Result<NormalizedField, FieldError> {
    let Some(raw) = cell_text(cell)? else {
        return Ok(NormalizedField::Null);
    };
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    Ok(match digits.len() {
        0 => NormalizedField::Null,
        CPF_DIGITS => SqlLiteral::Text(format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..]
        ))
        .into(),
        _ => SqlLiteral::Text(raw.into_owned()).into(),
    })
}
