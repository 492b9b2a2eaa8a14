//! Disability category derived from the diagnosis text.

use apae_model::{CellValue, SqlLiteral, fold_accents};

use super::folded_text;
use crate::error::FieldError;

/// Disability category codes of the destination schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabilityType {
    Visual = 1,
    Hearing = 2,
    Intellectual = 3,
    Physical = 4,
    Multiple = 5,
}

impl DisabilityType {
    pub fn code(self) -> i64 {
        self as i64
    }
}

/// Keyword groups in match priority; keywords are accent-free stems.
const KEYWORD_GROUPS: &[(DisabilityType, &[&str])] = &[
    (DisabilityType::Visual, &["VISUAL", "CEGO", "CEGUEIRA"]),
    (DisabilityType::Hearing, &["AUDITIV", "SURDO", "SURDEZ"]),
    (DisabilityType::Physical, &["FISIC", "MOTOR", "PARALISIA"]),
    (DisabilityType::Multiple, &["MULTIPLA"]),
];

/// First keyword group found in the diagnosis wins. No match (or no
/// diagnosis) is [`DisabilityType::Intellectual`], the most common case.
pub fn classify_diagnosis(cell: &CellValue) -> Result<DisabilityType, FieldError> {
    let Some(text) = folded_text(cell)? else {
        return Ok(DisabilityType::Intellectual);
    };
    let text = fold_accents(&text);
    let category = KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map_or(DisabilityType::Intellectual, |(category, _)| *category);
    Ok(category)
}

impl From<DisabilityType> for SqlLiteral {
    fn from(category: DisabilityType) -> Self {
        SqlLiteral::Integer(category.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> DisabilityType {
        classify_diagnosis(&CellValue::from(text)).unwrap()
    }

    #[test]
    fn keyword_groups() {
        assert_eq!(classify("baixa visão / cegueira"), DisabilityType::Visual);
        assert_eq!(classify("deficiência auditiva"), DisabilityType::Hearing);
        assert_eq!(classify("Paralisia cerebral"), DisabilityType::Physical);
        assert_eq!(classify("deficiência física"), DisabilityType::Physical);
        assert_eq!(classify("deficiência múltipla"), DisabilityType::Multiple);
    }

    #[test]
    fn priority_order() {
        // visual is checked before multiple
        assert_eq!(classify("múltipla (visual e motora)"), DisabilityType::Visual);
    }

    #[test]
    fn default_is_intellectual() {
        assert_eq!(classify("intelectual"), DisabilityType::Intellectual);
        assert_eq!(classify("síndrome de down"), DisabilityType::Intellectual);
        assert_eq!(
            classify_diagnosis(&CellValue::Empty).unwrap(),
            DisabilityType::Intellectual
        );
        assert_eq!(SqlLiteral::from(DisabilityType::Intellectual).to_string(), "3");
    }
}
