//! Yes/no fields.

use apae_model::{CellValue, FieldWarning, NormalizedField, SqlLiteral, UnmatchedBoolean};

use super::{Conversion, folded_text};
use crate::error::FieldError;

const AFFIRMATIVE: &[&str] = &["SIM", "S", "TRUE", "1", "YES", "Y"];
const NEGATIVE: &[&str] = &["NÃO", "NAO", "N", "FALSE", "0", "NO"];

/// Matches Portuguese and English yes/no tokens (accented or not).
///
/// Blank and unrecognized input follow `policy`; only the unrecognized case
/// carries a warning.
pub fn normalize_boolean(
    cell: &CellValue,
    policy: UnmatchedBoolean,
) -> Result<Conversion, FieldError> {
    let fallback = unmatched_value(policy);
    let Some(value) = folded_text(cell)? else {
        return Ok(Conversion::ok(fallback));
    };
    Ok(if AFFIRMATIVE.contains(&value.as_str()) {
        Conversion::ok(SqlLiteral::Boolean(true))
    } else if NEGATIVE.contains(&value.as_str()) {
        Conversion::ok(SqlLiteral::Boolean(false))
    } else {
        Conversion::degraded(fallback, FieldWarning::UnrecognizedBoolean { value })
    })
}

/// The value `policy` assigns to blank or unrecognized input.
pub(crate) fn unmatched_value(policy: UnmatchedBoolean) -> NormalizedField {
    match policy {
        UnmatchedBoolean::False => SqlLiteral::Boolean(false).into(),
        UnmatchedBoolean::Null => NormalizedField::Null,
    }
}
