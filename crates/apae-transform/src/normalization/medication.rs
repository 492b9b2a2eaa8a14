//! Medication usage: a yes/no flag plus the medication list.

use apae_model::{CellValue, NormalizedField, SqlLiteral};

use super::{folded_text, text_literal, words};
use crate::error::FieldError;

const NEGATIVE_MARKERS: &[&str] = &["NÃO", "NAO"];
const AFFIRMATIVE_MARKERS: &[&str] = &["SIM"];
/// Unit abbreviations and dosage forms that reveal a medication list.
const DOSAGE_KEYWORDS: &[&str] = &["MG", "ML", "COMPRIMIDO", "CAPSULA", "CÁPSULA", "GOTAS"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationUsage {
    pub uses: NormalizedField,
    pub names: NormalizedField,
}

impl MedicationUsage {
    fn none() -> Self {
        Self {
            uses: SqlLiteral::Boolean(false).into(),
            names: NormalizedField::Null,
        }
    }

    fn uses(names: NormalizedField) -> Self {
        Self {
            uses: SqlLiteral::Boolean(true).into(),
            names,
        }
    }
}

/// Derives `(uses medication, medication names)` from free text.
///
/// In priority order: a "não" marker means no medication; a "sim" marker
/// means medication, listed by the parenthesized segment if any; a dosage
/// keyword means medication listed by the whole text. Blank or unmatched
/// text is `false` with no list.
/// Markers match whole words, so "SIMETICONA" is not a "sim".
pub fn derive_medication(cell: &CellValue) -> Result<MedicationUsage, FieldError> {
    let Some(text) = folded_text(cell)? else {
        return Ok(MedicationUsage::none());
    };
    let has_marker = |markers: &[&str]| words(&text).any(|word| markers.contains(&word));

    if has_marker(NEGATIVE_MARKERS) {
        return Ok(MedicationUsage::none());
    }
    if has_marker(AFFIRMATIVE_MARKERS) {
        let names = parenthesized(&text).map_or(NormalizedField::Null, text_literal);
        return Ok(MedicationUsage::uses(names));
    }
    if DOSAGE_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        return Ok(MedicationUsage::uses(text_literal(&text)));
    }
    Ok(MedicationUsage::none())
}

/// Content between the first `(` and the next `)`.
fn parenthesized(text: &str) -> Option<&str> {
    let open = text.find('(')?;
    let rest = &text[open + 1..];
    let close = rest.find(')')?;
    Some(&rest[..close])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(text: &str) -> MedicationUsage {
        derive_medication(&CellValue::from(text)).unwrap()
    }

    #[test]
    fn sim_with_list() {
        let usage = derive("SIM (dipirona 500mg)");
        assert_eq!(usage.uses.to_string(), "true");
        assert_eq!(usage.names.as_text(), Some("DIPIRONA 500MG"));
    }

    #[test]
    fn sim_without_list() {
        let usage = derive("sim");
        assert_eq!(usage.uses.to_string(), "true");
        assert!(usage.names.is_null());
    }

    #[test]
    fn nao_wins_over_everything() {
        assert_eq!(derive("NÃO"), MedicationUsage::none());
        assert_eq!(derive("nao usa (antes 20mg)"), MedicationUsage::none());
        assert_eq!(derive("na\u{0303}o"), MedicationUsage::none());
    }

    #[test]
    fn dosage_keywords_keep_full_text() {
        let usage = derive("Ritalina 10mg 2x ao dia");
        assert_eq!(usage.uses.to_string(), "true");
        assert_eq!(usage.names.as_text(), Some("RITALINA 10MG 2X AO DIA"));
    }

    #[test]
    fn marker_must_be_a_word() {
        let usage = derive("simeticona 40 gotas");
        assert_eq!(usage.names.as_text(), Some("SIMETICONA 40 GOTAS"));
    }

    #[test]
    fn nothing_recognized() {
        assert_eq!(derive("acompanhamento"), MedicationUsage::none());
        let blank = derive_medication(&CellValue::Empty).unwrap();
        assert_eq!(blank, MedicationUsage::none());
        assert_eq!(blank.uses.to_string(), "false");
    }

    #[test]
    fn empty_parentheses_are_null() {
        assert!(derive("SIM ( )").names.is_null());
    }
}
