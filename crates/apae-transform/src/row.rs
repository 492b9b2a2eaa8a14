//! Row Transformer: one raw record to one output row.

use apae_model::{
    CityLookupTable, Column, ConversionOptions, ConversionReport, FieldWarning, NormalizedField,
    OutputRow, RawRecord, SqlLiteral,
};
use tracing::{debug, warn};

use crate::error::{FieldError, RowError};
use crate::fields;
use crate::normalization::{
    CityState, Conversion, aggregate_notes, classify_diagnosis, derive_medication, normalize_date,
    normalize_document, normalize_sex, normalize_status, normalize_text, resolve_municipality,
};

/// A converted row with the field warnings raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedRow {
    pub row: OutputRow,
    pub warnings: Vec<(Column, FieldWarning)>,
    /// Parsed city/state, when the record had one.
    pub location: Option<CityState>,
}

/// Applies the field rules to records, against a fixed lookup table and
/// configuration.
#[derive(Debug, Clone, Copy)]
pub struct RowTransformer<'a> {
    cities: &'a CityLookupTable,
    options: &'a ConversionOptions,
}

impl<'a> RowTransformer<'a> {
    pub fn new(cities: &'a CityLookupTable, options: &'a ConversionOptions) -> Self {
        Self { cities, options }
    }

    /// Converts a record, recording the outcome in `report`.
    ///
    /// Records without a name yield `None` silently. A record with a cell of
    /// impossible shape yields `None` and a row-level warning.
    pub fn transform(&self, record: &RawRecord, report: &mut ConversionReport) -> Option<OutputRow> {
        self.transform_detailed(record, report)
            .map(|transformed| transformed.row)
    }

    /// Like [`Self::transform`], keeping warnings and location.
    pub fn transform_detailed(
        &self,
        record: &RawRecord,
        report: &mut ConversionReport,
    ) -> Option<TransformedRow> {
        let row = record.index();
        match self.try_transform(record) {
            Ok(None) => {
                debug!(row, "skipping record without name");
                report.record_blank();
                None
            }
            Ok(Some(transformed)) => {
                for (column, warning) in &transformed.warnings {
                    warn!(row, column = %column, "field value degraded");
                    report.warn(row, *column, warning.clone());
                }
                report.record_converted();
                Some(transformed)
            }
            Err(error) => {
                warn!(row, error = %error, "record skipped");
                report.record_skipped(row, error.to_string());
                None
            }
        }
    }

    /// Converts a record without touching a report.
    ///
    /// `Ok(None)` means the record has no name and is not a candidate row.
    pub fn try_transform(&self, record: &RawRecord) -> Result<Option<TransformedRow>, RowError> {
        let name = record.first_present(fields::NAME);
        if name.is_blank() {
            return Ok(None);
        }

        let table = &self.options.table;
        let cell = |aliases: &[&str]| record.first_present(aliases);
        let wants = |column: Column| table.position(column).is_some();

        let medication = (wants(Column::MedicationUse) || wants(Column::MedicationNames))
            .then(|| derive_medication(cell(fields::MEDICATION)))
            .transpose()
            .map_err(|source| RowError::Field {
                column: Column::MedicationUse,
                source,
            })?;
        let city = wants(Column::MunicipalityId)
            .then(|| {
                resolve_municipality(
                    cell(fields::CITY),
                    self.cities,
                    self.options.city_separator,
                    &self.options.default_state,
                )
            })
            .transpose()
            .map_err(|source| RowError::Field {
                column: Column::MunicipalityId,
                source,
            })?;

        let mut builder = RowBuilder::default();
        let mut values = Vec::with_capacity(table.width());
        for &column in table.columns() {
            let value: NormalizedField = match column {
                Column::Id => SqlLiteral::GeneratedId.into(),
                Column::Status => builder.take(column, normalize_status(cell(fields::STATUS)))?,
                Column::Name => builder.text(column, normalize_text(name))?,
                Column::BirthDate => builder.take(column, normalize_date(cell(fields::BIRTH_DATE)))?,
                Column::Address => builder.text(column, normalize_text(cell(fields::ADDRESS)))?,
                Column::Neighborhood => {
                    builder.text(column, normalize_text(cell(fields::NEIGHBORHOOD)))?
                }
                Column::PostalCode => builder.text(column, normalize_text(cell(fields::POSTAL_CODE)))?,
                Column::DocumentNumber => {
                    builder.text(column, normalize_document(cell(fields::DOCUMENT)))?
                }
                Column::Sex => builder.take(column, normalize_sex(cell(fields::SEX)))?,
                Column::DisabilityType => classify_diagnosis(cell(fields::DIAGNOSIS))
                    .map(|category| NormalizedField::from(SqlLiteral::from(category)))
                    .map_err(|source| RowError::Field { column, source })?,
                Column::MedicationUse => medication
                    .as_ref()
                    .map(|usage| usage.uses.clone())
                    .unwrap_or_default(),
                Column::MedicationNames => medication
                    .as_ref()
                    .map(|usage| usage.names.clone())
                    .unwrap_or_default(),
                Column::MotherName => builder.text(column, normalize_text(cell(fields::MOTHER)))?,
                Column::FatherName => builder.text(column, normalize_text(cell(fields::FATHER)))?,
                Column::GuardianName => builder.text(column, normalize_text(cell(fields::GUARDIAN)))?,
                Column::GuardianPhone => {
                    builder.text(column, normalize_text(cell(fields::GUARDIAN_PHONE)))?
                }
                Column::EnrollmentDate => {
                    builder.take(column, normalize_date(cell(fields::ENROLLMENT_DATE)))?
                }
                Column::MunicipalityId => match &city {
                    Some(resolution) => builder.take(column, Ok(resolution.conversion.clone()))?,
                    None => NormalizedField::Null,
                },
                Column::Notes => builder.text(column, aggregate_notes(record))?,
            };
            values.push(value);
        }

        let row = OutputRow::new(record.index(), values, table)?;
        Ok(Some(TransformedRow {
            row,
            warnings: builder.warnings,
            location: city.and_then(|resolution| resolution.location),
        }))
    }
}

/// Collects field warnings while a row is built; they only reach the report
/// if the whole row succeeds.
#[derive(Default)]
struct RowBuilder {
    warnings: Vec<(Column, FieldWarning)>,
}

impl RowBuilder {
    fn take(
        &mut self,
        column: Column,
        result: Result<Conversion, FieldError>,
    ) -> Result<NormalizedField, RowError> {
        let conversion = result.map_err(|source| RowError::Field { column, source })?;
        if let Some(warning) = conversion.warning {
            self.warnings.push((column, warning));
        }
        Ok(conversion.value)
    }

    fn text(
        &mut self,
        column: Column,
        result: Result<NormalizedField, FieldError>,
    ) -> Result<NormalizedField, RowError> {
        self.take(column, result.map(Conversion::ok))
    }
}

#[cfg(test)]
mod tests {
    use apae_model::{CellValue, TargetTable};

    use super::*;

    const FELIZ: &str = "9557b00a-2f75-46ac-bd56-ceec0cb32e40";

    fn cities() -> CityLookupTable {
        CityLookupTable::from_entries([("feliz", FELIZ)]).unwrap()
    }

    #[test]
    fn blank_name_is_not_a_candidate() {
        let (cities, options) = (cities(), ConversionOptions::default());
        let transformer = RowTransformer::new(&cities, &options);
        let record = RawRecord::new(4)
            .with_cell("Nome", "   ")
            .with_cell("Cidade/UF", "Gramado/RS");
        let mut report = ConversionReport::new();
        assert!(transformer.transform(&record, &mut report).is_none());
        assert_eq!(report.blank(), 1);
        assert!(!report.has_warnings());
    }

    #[test]
    fn warnings_are_attributed_to_columns() {
        let (cities, options) = (cities(), ConversionOptions::default());
        let transformer = RowTransformer::new(&cities, &options);
        let record = RawRecord::new(0)
            .with_cell("Nome", "Caio")
            .with_cell("Dt Nasc", "31/02/2001")
            .with_cell("Cidade/UF", "Gramado/RS");
        let transformed = transformer.try_transform(&record).unwrap().unwrap();
        let columns: Vec<Column> = transformed.warnings.iter().map(|(column, _)| *column).collect();
        assert_eq!(columns, vec![Column::BirthDate, Column::MunicipalityId]);
        assert_eq!(transformed.location.unwrap().city, "GRAMADO");
    }

    #[test]
    fn fault_names_the_column() {
        let (cities, options) = (cities(), ConversionOptions::default());
        let transformer = RowTransformer::new(&cities, &options);
        let record = RawRecord::new(0)
            .with_cell("Nome", "Caio")
            .with_cell("Mãe", CellValue::Number(f64::INFINITY));
        let error = transformer.try_transform(&record).unwrap_err();
        assert!(matches!(
            error,
            RowError::Field {
                column: Column::MotherName,
                source: FieldError::NonFiniteNumber(_)
            }
        ));
    }

    #[test]
    fn custom_table_only_computes_its_columns() {
        let table = TargetTable::new("assistido_min", vec![Column::Id, Column::Name]).unwrap();
        let cities = cities();
        let options = ConversionOptions::default().with_table(table);
        let transformer = RowTransformer::new(&cities, &options);
        let record = RawRecord::new(0)
            .with_cell("Nome", "caio")
            .with_cell("Cidade/UF", "Gramado/RS");
        let transformed = transformer.try_transform(&record).unwrap().unwrap();
        assert!(transformed.warnings.is_empty());
        assert!(transformed.location.is_none());
        let rendered: Vec<String> = transformed.row.values().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["gen_random_uuid()", "'CAIO'"]);
    }
}
