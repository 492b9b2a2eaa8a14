//! Conversion report: converted-row count plus row-tagged warnings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::Column;
use crate::warning::FieldWarning;

/// Number of warnings echoed verbatim in diagnostics.
pub const DEFAULT_WARNING_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningDetail {
    /// A field degraded to null (or a documented default).
    Field {
        column: Column,
        warning: FieldWarning,
    },
    /// The whole row was dropped.
    RowSkipped { reason: String },
}

/// A warning tagged with the source row it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWarning {
    pub row: usize,
    pub detail: WarningDetail,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            WarningDetail::Field { column, warning } => {
                write!(f, "row {}: {column}: {warning}", self.row)
            }
            WarningDetail::RowSkipped { reason } => {
                write!(f, "row {}: skipped: {reason}", self.row)
            }
        }
    }
}

/// Accumulates the outcome of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    converted: usize,
    blank: usize,
    skipped: usize,
    warnings: Vec<RowWarning>,
}

impl ConversionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_converted(&mut self) {
        self.converted += 1;
    }

    /// A row without a name: expected trailing filler, not a warning.
    pub fn record_blank(&mut self) {
        self.blank += 1;
    }

    pub fn record_skipped(&mut self, row: usize, reason: impl Into<String>) {
        self.skipped += 1;
        self.warnings.push(RowWarning {
            row,
            detail: WarningDetail::RowSkipped {
                reason: reason.into(),
            },
        });
    }

    pub fn warn(&mut self, row: usize, column: Column, warning: FieldWarning) {
        self.warnings.push(RowWarning {
            row,
            detail: WarningDetail::Field { column, warning },
        });
    }

    pub fn converted(&self) -> usize {
        self.converted
    }

    pub fn blank(&self) -> usize {
        self.blank
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Warnings in the order they were recorded.
    pub fn warnings(&self) -> &[RowWarning] {
        &self.warnings
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Folds a report from another batch into this one.
    ///
    /// Batches may finish in any order; use [`Self::warnings_by_row`] for a
    /// row-ordered view.
    pub fn merge(&mut self, other: ConversionReport) {
        self.converted += other.converted;
        self.blank += other.blank;
        self.skipped += other.skipped;
        self.warnings.extend(other.warnings);
    }

    /// Warnings ordered by row index; ties keep recording order.
    pub fn warnings_by_row(&self) -> Vec<&RowWarning> {
        let mut ordered: Vec<&RowWarning> = self.warnings.iter().collect();
        ordered.sort_by_key(|warning| warning.row);
        ordered
    }

    /// Summary with the first [`DEFAULT_WARNING_LIMIT`] warnings.
    pub fn default_summary(&self) -> ReportSummary {
        self.summary(DEFAULT_WARNING_LIMIT)
    }

    /// Summary with at most `limit` warnings rendered verbatim.
    pub fn summary(&self, limit: usize) -> ReportSummary {
        let shown: Vec<String> = self
            .warnings
            .iter()
            .take(limit)
            .map(ToString::to_string)
            .collect();
        ReportSummary {
            converted: self.converted,
            total_warnings: self.warnings.len(),
            remaining: self.warnings.len() - shown.len(),
            shown,
        }
    }
}

/// Diagnostic view of a [`ConversionReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub converted: usize,
    pub total_warnings: usize,
    pub shown: Vec<String>,
    pub remaining: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date_warning(value: &str) -> FieldWarning {
        FieldWarning::UnparsableDate {
            value: value.to_string(),
        }
    }

    #[test]
    fn summary_limits_shown_warnings() {
        let mut report = ConversionReport::new();
        for row in 0..13 {
            report.warn(row, Column::BirthDate, date_warning("31/31/2000"));
        }
        report.record_converted();
        let summary = report.summary(10);
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.total_warnings, 13);
        assert_eq!(summary.shown.len(), 10);
        assert_eq!(summary.remaining, 3);
        assert_eq!(
            summary.shown[0],
            "row 0: data_nascimento: invalid date '31/31/2000'"
        );
    }

    #[test]
    fn merge_is_order_tolerant() {
        let mut late = ConversionReport::new();
        late.warn(7, Column::Sex, FieldWarning::UnrecognizedSex { value: "X".into() });
        late.record_converted();

        let mut early = ConversionReport::new();
        early.record_skipped(2, "bad cell");
        early.record_converted();

        late.merge(early);
        assert_eq!(late.converted(), 2);
        assert_eq!(late.skipped(), 1);
        let rows: Vec<usize> = late.warnings_by_row().iter().map(|w| w.row).collect();
        assert_eq!(rows, vec![2, 7]);
    }
}
