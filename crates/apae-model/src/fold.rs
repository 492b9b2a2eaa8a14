//! Case and accent folding for header labels and city names.
//!
//! Exports of the record system disagree on accents ("Situação" vs
//! "Situacao"), casing and Unicode form, so lookups fall back to a folded key.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strips diacritics: decomposes to NFD and drops the combining marks.
///
/// Ordinal indicators fold to their letter, so "Nº" matches "No".
pub fn fold_accents(value: &str) -> String {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(|ch| match ch {
            'º' | '°' => 'o',
            'ª' => 'a',
            other => other,
        })
        .collect()
}

/// Trimmed, lower-cased and accent-folded key.
pub fn fold_key(value: &str) -> String {
    fold_accents(&value.trim().to_lowercase())
}
