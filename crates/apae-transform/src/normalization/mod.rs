//! Per-field normalization rules.
//!
//! Every rule maps a raw cell to a [`NormalizedField`]. Values that cannot be
//! interpreted degrade to `null` (or a documented default) and carry a
//! [`FieldWarning`]; only cells of an impossible shape fail with a
//! [`FieldError`], which drops the row.

use std::borrow::Cow;

use apae_model::{CellValue, FieldWarning, NormalizedField};
use unicode_normalization::UnicodeNormalization;

use crate::error::FieldError;

pub mod boolean;
pub mod categorical;
pub mod city;
pub mod date;
pub mod diagnosis;
pub mod document;
pub mod medication;
pub mod notes;
pub mod text;

pub use boolean::normalize_boolean;
pub use categorical::{normalize_sex, normalize_status};
pub use city::{CityResolution, CityState, parse_city_state, resolve_municipality};
pub use date::{DATE_FORMATS, normalize_date, parse_date};
pub use diagnosis::{DisabilityType, classify_diagnosis};
pub use document::normalize_document;
pub use medication::{MedicationUsage, derive_medication};
pub use notes::aggregate_notes;
pub use text::{normalize_text, text_literal};

/// A normalized value plus the warning explaining a degraded result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub value: NormalizedField,
    pub warning: Option<FieldWarning>,
}

impl Conversion {
    pub fn ok(value: impl Into<NormalizedField>) -> Self {
        Self {
            value: value.into(),
            warning: None,
        }
    }

    pub fn null() -> Self {
        Self::ok(NormalizedField::Null)
    }

    pub fn degraded(value: impl Into<NormalizedField>, warning: FieldWarning) -> Self {
        Self {
            value: value.into(),
            warning: Some(warning),
        }
    }
}

/// Untrimmed cell text, or `None` for blank cells.
///
/// Rejects cells no SQL literal can carry.
pub(crate) fn cell_text(cell: &CellValue) -> Result<Option<Cow<'_, str>>, FieldError> {
    match cell {
        CellValue::Number(number) if !number.is_finite() => {
            Err(FieldError::NonFiniteNumber(*number))
        }
        CellValue::Text(text) if text.contains('\0') => Err(FieldError::NulCharacter),
        _ if cell.is_blank() => Ok(None),
        _ => Ok(cell.raw_text()),
    }
}

/// Trimmed, upper-cased cell text in composed (NFC) form, or `None` for
/// blank cells.
pub(crate) fn folded_text(cell: &CellValue) -> Result<Option<String>, FieldError> {
    Ok(cell_text(cell)?.map(|text| text.trim().nfc().collect::<String>().to_uppercase()))
}

/// Splits upper-cased text into alphanumeric words.
pub(crate) fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
}
