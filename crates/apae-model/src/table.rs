//! Destination table layout and converted rows.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::literal::NormalizedField;

/// Destination column of the `assistido` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Id,
    Status,
    Name,
    BirthDate,
    Address,
    Neighborhood,
    PostalCode,
    DocumentNumber,
    Sex,
    DisabilityType,
    MedicationUse,
    MedicationNames,
    MotherName,
    FatherName,
    GuardianName,
    GuardianPhone,
    EnrollmentDate,
    MunicipalityId,
    Notes,
}

impl Column {
    /// The documented 19-column insert order.
    pub const ALL: [Column; 19] = [
        Column::Id,
        Column::Status,
        Column::Name,
        Column::BirthDate,
        Column::Address,
        Column::Neighborhood,
        Column::PostalCode,
        Column::DocumentNumber,
        Column::Sex,
        Column::DisabilityType,
        Column::MedicationUse,
        Column::MedicationNames,
        Column::MotherName,
        Column::FatherName,
        Column::GuardianName,
        Column::GuardianPhone,
        Column::EnrollmentDate,
        Column::MunicipalityId,
        Column::Notes,
    ];

    /// Column name in the database schema.
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Status => "status",
            Self::Name => "nome",
            Self::BirthDate => "data_nascimento",
            Self::Address => "endereco",
            Self::Neighborhood => "bairro",
            Self::PostalCode => "cep",
            Self::DocumentNumber => "cpf",
            Self::Sex => "sexo",
            Self::DisabilityType => "tipo_deficiencia",
            Self::MedicationUse => "medicamentos_uso",
            Self::MedicationNames => "medicamentos_quais",
            Self::MotherName => "nome_mae",
            Self::FatherName => "nome_pai",
            Self::GuardianName => "nome_responsavel",
            Self::GuardianPhone => "telefone_responsavel",
            Self::EnrollmentDate => "data_cadastro",
            Self::MunicipalityId => "id_municipio",
            Self::Notes => "observacao",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Id => "Identity placeholder (generated by the database)",
            Self::Status => "Status code (1 = active, 2 = inactive)",
            Self::Name => "Full name",
            Self::BirthDate => "Birth date",
            Self::Address => "Street address",
            Self::Neighborhood => "Neighborhood",
            Self::PostalCode => "Postal code (CEP)",
            Self::DocumentNumber => "Taxpayer document (CPF)",
            Self::Sex => "Sex code (1 = M, 2 = F)",
            Self::DisabilityType => "Disability category derived from the diagnosis",
            Self::MedicationUse => "Uses medication",
            Self::MedicationNames => "Medication names",
            Self::MotherName => "Mother's name",
            Self::FatherName => "Father's name",
            Self::GuardianName => "Guardian's name",
            Self::GuardianPhone => "Guardian's phone",
            Self::EnrollmentDate => "Enrollment date",
            Self::MunicipalityId => "Municipality identifier (city lookup)",
            Self::Notes => "Observations aggregated from auxiliary columns",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

/// Destination table name plus its ordered column list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetTable {
    name: String,
    columns: Vec<Column>,
}

impl TargetTable {
    pub const DEFAULT_NAME: &'static str = "assistido";

    /// Creates a table layout, rejecting empty or duplicated column lists.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(ModelError::EmptyTable);
        }
        for (position, column) in columns.iter().enumerate() {
            if columns[..position].contains(column) {
                return Err(ModelError::DuplicateColumn(*column));
            }
        }
        Ok(Self {
            name: name.into(),
            columns,
        })
    }

    /// The `assistido` table with the documented 19-column order.
    pub fn assistido() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            columns: Column::ALL.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|candidate| *candidate == column)
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        Self::assistido()
    }
}

/// Values of one converted record, positionally aligned to a [`TargetTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    source_index: usize,
    values: Vec<NormalizedField>,
}

impl OutputRow {
    /// Creates a row, checking its width against the table.
    pub fn new(
        source_index: usize,
        values: Vec<NormalizedField>,
        table: &TargetTable,
    ) -> Result<Self> {
        if values.len() != table.width() {
            return Err(ModelError::RowWidth {
                expected: table.width(),
                actual: values.len(),
            });
        }
        Ok(Self {
            source_index,
            values,
        })
    }

    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn values(&self) -> &[NormalizedField] {
        &self.values
    }

    /// Value for a column, resolved through the table that built the row.
    pub fn get(&self, table: &TargetTable, column: Column) -> Option<&NormalizedField> {
        table
            .position(column)
            .and_then(|position| self.values.get(position))
    }
}
