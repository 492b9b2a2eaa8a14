//! Observations column aggregated from auxiliary sub-fields.

use apae_model::{NormalizedField, RawRecord};

use super::{cell_text, text_literal};
use crate::error::FieldError;
use crate::fields;

/// Joins `Label: value` for every non-blank sub-field with `". "`.
///
/// The aggregate then goes through the text rule, so a record with no
/// sub-fields yields `null`, never an empty quoted string.
pub fn aggregate_notes(record: &RawRecord) -> Result<NormalizedField, FieldError> {
    let mut parts = Vec::new();
    for (label, aliases) in fields::NOTES {
        if let Some(value) = cell_text(record.first_present(aliases))? {
            parts.push(format!("{label}: {}", value.trim()));
        }
    }
    Ok(text_literal(&parts.join(". ")))
}
