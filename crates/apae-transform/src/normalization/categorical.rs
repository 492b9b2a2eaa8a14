//! Enumerated codes: sex and entity status.

use apae_model::{CellValue, FieldWarning, NormalizedField, SqlLiteral};

use super::{Conversion, folded_text};
use crate::error::FieldError;

pub const SEX_MALE: i64 = 1;
pub const SEX_FEMALE: i64 = 2;

pub const STATUS_ACTIVE: i64 = 1;
pub const STATUS_INACTIVE: i64 = 2;

/// `M`/`MASCULINO` → 1, `F`/`FEMININO` → 2.
///
/// Blank cells are `null`; anything else is `null` with a warning.
pub fn normalize_sex(cell: &CellValue) -> Result<Conversion, FieldError> {
    let Some(value) = folded_text(cell)? else {
        return Ok(Conversion::null());
    };
    Ok(match value.as_str() {
        "M" | "MASCULINO" => Conversion::ok(SqlLiteral::Integer(SEX_MALE)),
        "F" | "FEMININO" => Conversion::ok(SqlLiteral::Integer(SEX_FEMALE)),
        _ => Conversion::degraded(NormalizedField::Null, FieldWarning::UnrecognizedSex { value }),
    })
}

/// `ATIVO` → 1, `INATIVO` → 2.
///
/// Unlike the other categorical fields, a blank status is not `null`: it
/// defaults to the active code. Unrecognized values also fall back to
/// active, with a warning.
pub fn normalize_status(cell: &CellValue) -> Result<Conversion, FieldError> {
    let active = SqlLiteral::Integer(STATUS_ACTIVE);
    let Some(value) = folded_text(cell)? else {
        return Ok(Conversion::ok(active));
    };
    Ok(match value.as_str() {
        "ATIVO" | "ACTIVE" | "1" => Conversion::ok(active),
        "INATIVO" | "INACTIVE" | "0" | "2" => {
            Conversion::ok(SqlLiteral::Integer(STATUS_INACTIVE))
        }
        _ => Conversion::degraded(active, FieldWarning::UnrecognizedStatus { value }),
    })
}
