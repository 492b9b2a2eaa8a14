//! Free-text fields.

use apae_model::{CellValue, NormalizedField, SqlLiteral};

use super::cell_text;
use crate::error::FieldError;

/// Trims and upper-cases a cell; blank cells become `null`.
///
/// Quote escaping happens when the literal is rendered, so normalizing the
/// content of an already normalized value yields the same value.
pub fn normalize_text(cell: &CellValue) -> Result<NormalizedField, FieldError> {
    Ok(match cell_text(cell)? {
        Some(text) => text_literal(&text),
        None => NormalizedField::Null,
    })
}

/// The text rule applied to a string that did not come from a single cell.
pub fn text_literal(value: &str) -> NormalizedField {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NormalizedField::Null
    } else {
        SqlLiteral::Text(trimmed.to_uppercase()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_and_trims() {
        let field = normalize_text(&CellValue::from("  rua willy reichert, 295 ")).unwrap();
        assert_eq!(field.as_text(), Some("RUA WILLY REICHERT, 295"));
    }

    #[test]
    fn accented_letters_are_uppercased() {
        let field = normalize_text(&CellValue::from("irena lúcia d'ávila")).unwrap();
        assert_eq!(field.as_text(), Some("IRENA LÚCIA D'ÁVILA"));
        assert_eq!(field.to_string(), "'IRENA LÚCIA D''ÁVILA'");
    }

    #[test]
    fn blank_is_null() {
        assert!(normalize_text(&CellValue::Empty).unwrap().is_null());
        assert!(normalize_text(&CellValue::from(" \t ")).unwrap().is_null());
        assert!(text_literal("").is_null());
    }

    #[test]
    fn numbers_are_text() {
        let field = normalize_text(&CellValue::Number(95770.0)).unwrap();
        assert_eq!(field.as_text(), Some("95770"));
    }
}
