//! Raw spreadsheet cells and records.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::fold::fold_key;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// One untyped cell of the source export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    /// Missing or empty cell.
    #[default]
    Empty,
    /// Text exactly as exported (not trimmed).
    Text(String),
    /// Numeric cell, as produced by spreadsheet readers.
    Number(f64),
}

impl CellValue {
    /// Builds a cell from exported text; the empty string is an empty cell.
    pub fn from_export(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_string())
        }
    }

    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// The cell rendered as text, untrimmed. `None` for empty cells.
    ///
    /// Integral numbers render without a fractional part so that document
    /// numbers and postal codes read from numeric cells keep their digits.
    pub fn raw_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Empty => None,
            Self::Text(text) => Some(Cow::Borrowed(text.as_str())),
            Self::Number(number) => Some(Cow::Owned(format_number(*number))),
        }
    }

    /// Trimmed text, `None` when blank.
    pub fn trimmed(&self) -> Option<Cow<'_, str>> {
        if self.is_blank() {
            return None;
        }
        match self.raw_text()? {
            Cow::Borrowed(text) => Some(Cow::Borrowed(text.trim())),
            Cow::Owned(text) => Some(Cow::Owned(text.trim().to_string())),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::from_export(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

fn format_number(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

/// One source row: ordered header label to cell mapping.
///
/// Labels are matched exactly first and then by folded key, so that
/// "Situacao" still finds a "Situação" column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    index: usize,
    cells: Vec<(String, CellValue)>,
}

impl RawRecord {
    /// Creates an empty record for the given source row index.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            cells: Vec::new(),
        }
    }

    /// Builds a record from label/value pairs.
    pub fn from_pairs<I, L, V>(index: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<String>,
        V: Into<CellValue>,
    {
        let cells = pairs
            .into_iter()
            .map(|(label, value)| (label.into(), value.into()))
            .collect();
        Self { index, cells }
    }

    /// Appends a cell.
    pub fn push(&mut self, label: impl Into<String>, value: CellValue) {
        self.cells.push((label.into(), value));
    }

    /// Builder-style [`RawRecord::push`].
    #[must_use]
    pub fn with_cell(mut self, label: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(label, value.into());
        self
    }

    /// Zero-based index of the row among the data rows of the source.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(label, value)| (label.as_str(), value))
    }

    /// Looks up a cell by label: exact match, then folded match.
    pub fn get(&self, label: &str) -> Option<&CellValue> {
        if let Some((_, value)) = self.cells.iter().find(|(candidate, _)| candidate == label) {
            return Some(value);
        }
        let wanted = fold_key(label);
        self.cells
            .iter()
            .find(|(candidate, _)| fold_key(candidate) == wanted)
            .map(|(_, value)| value)
    }

    /// First non-blank cell among the aliases, in alias order.
    ///
    /// Returns an empty cell when every alias is absent or blank.
    pub fn first_present(&self, aliases: &[&str]) -> &CellValue {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .find(|value| !value.is_blank())
            .unwrap_or(&EMPTY_CELL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(!CellValue::from(" x ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn numbers_render_without_fraction() {
        assert_eq!(
            CellValue::Number(96773677068.0).raw_text().as_deref(),
            Some("96773677068")
        );
        assert_eq!(CellValue::Number(1.5).raw_text().as_deref(), Some("1.5"));
    }

    #[test]
    fn get_matches_folded_labels() {
        let record = RawRecord::new(0).with_cell("Situação", "ATIVO");
        assert_eq!(record.get("Situacao"), Some(&CellValue::from("ATIVO")));
        assert_eq!(record.get("situação "), Some(&CellValue::from("ATIVO")));
        assert_eq!(record.get("Sexo"), None);
    }

    #[test]
    fn first_present_skips_blank_aliases() {
        let record = RawRecord::new(3)
            .with_cell("Nome", "  ")
            .with_cell("nome", "Ana");
        assert_eq!(record.first_present(&["Nome", "nome"]), &CellValue::from("Ana"));
        assert_eq!(record.first_present(&["Mãe", "nome_mae"]), &CellValue::Empty);
        assert_eq!(record.index(), 3);
    }
}
