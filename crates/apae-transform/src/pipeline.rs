//! Batch conversion of a whole spreadsheet.

use std::collections::BTreeSet;
use std::time::Instant;

use apae_model::{CityLookupTable, ConversionOptions, ConversionReport, OutputRow, RawRecord};
use tracing::{info, info_span};

use crate::error::{Result, TransformError};
use crate::normalization::CityState;
use crate::row::RowTransformer;

/// Everything a conversion produced.
#[derive(Debug, Clone, Default)]
pub struct ConversionOutput {
    /// Converted rows, in source order.
    pub rows: Vec<OutputRow>,
    pub report: ConversionReport,
    /// Unique cities of the converted rows, sorted.
    pub cities: BTreeSet<CityState>,
}

impl ConversionOutput {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Owns the lookup table and options for a conversion run.
///
/// Both are fixed at construction and shared read-only by every row.
#[derive(Debug, Clone)]
pub struct ConversionPipeline {
    cities: CityLookupTable,
    options: ConversionOptions,
}

impl ConversionPipeline {
    pub fn new(cities: CityLookupTable, options: ConversionOptions) -> Self {
        Self { cities, options }
    }

    pub fn cities(&self) -> &CityLookupTable {
        &self.cities
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn transformer(&self) -> RowTransformer<'_> {
        RowTransformer::new(&self.cities, &self.options)
    }

    /// Converts every record, in order.
    ///
    /// Only an empty input fails; bad rows and bad values end up in the
    /// report.
    pub fn run(&self, records: &[RawRecord]) -> Result<ConversionOutput> {
        if records.is_empty() {
            return Err(TransformError::EmptyInput);
        }
        let span = info_span!(
            "convert",
            table = %self.options.table.name(),
            records = records.len()
        );
        let _guard = span.enter();
        let start = Instant::now();

        let transformer = self.transformer();
        let mut output = ConversionOutput::default();
        for record in records {
            if let Some(transformed) = transformer.transform_detailed(record, &mut output.report) {
                output.cities.extend(transformed.location);
                output.rows.push(transformed.row);
            }
        }

        info!(
            converted = output.report.converted(),
            blank = output.report.blank(),
            skipped = output.report.skipped(),
            warnings = output.report.warning_count(),
            cities = output.cities.len(),
            duration_ms = start.elapsed().as_millis(),
            "conversion complete"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use apae_model::CellValue;

    use super::*;

    fn pipeline() -> ConversionPipeline {
        let cities = CityLookupTable::from_entries([("feliz", "9557b00a-2f75-46ac-bd56-ceec0cb32e40")])
            .unwrap();
        ConversionPipeline::new(cities, ConversionOptions::default())
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            pipeline().run(&[]),
            Err(TransformError::EmptyInput)
        ));
    }

    #[test]
    fn blank_rows_are_counted_not_warned() {
        let records = vec![
            RawRecord::new(0).with_cell("Nome", "Ana").with_cell("Cidade/UF", "Feliz/RS"),
            RawRecord::new(1).with_cell("Nome", CellValue::Empty),
            RawRecord::new(2).with_cell("Nome", "Bia").with_cell("Cidade/UF", "FELIZ"),
        ];
        let output = pipeline().run(&records).unwrap();
        assert_eq!(output.rows.len(), 2);
        assert_eq!(output.report.blank(), 1);
        assert!(!output.report.has_warnings());
        assert_eq!(output.cities.len(), 1);
    }

    #[test]
    fn faulty_row_does_not_stop_the_run() {
        let records = vec![
            RawRecord::new(0).with_cell("Nome", "Ana").with_cell("Cep", f64::NAN),
            RawRecord::new(1).with_cell("Nome", "Bia"),
        ];
        let output = pipeline().run(&records).unwrap();
        assert_eq!(output.rows.len(), 1);
        assert_eq!(output.rows[0].source_index(), 1);
        assert_eq!(output.report.skipped(), 1);
        assert_eq!(output.report.warnings()[0].row, 0);
    }
}
