//! Accepted header spellings per semantic field.
//!
//! Exports of the record system label the same column differently; each
//! field lists its aliases in priority order and the first non-blank one wins.
//! Labels also match case- and accent-insensitively (see
//! [`RawRecord::get`](apae_model::RawRecord::get)).

use apae_model::Column;

pub const NAME: &[&str] = &["Nome", "nome"];
pub const STATUS: &[&str] = &["Situação", "situacao"];
pub const BIRTH_DATE: &[&str] = &["Dt Nasc", "data_nascimento"];
pub const ADDRESS: &[&str] = &["Endereço", "endereco"];
pub const NEIGHBORHOOD: &[&str] = &["Bairro", "bairro"];
pub const POSTAL_CODE: &[&str] = &["Cep", "cep"];
pub const DOCUMENT: &[&str] = &["CPF", "cpf"];
pub const SEX: &[&str] = &["Sexo", "sexo"];
pub const DIAGNOSIS: &[&str] = &["Diagnóstico", "diagnostico"];
pub const MEDICATION: &[&str] = &["Medic", "medicamentos"];
pub const MOTHER: &[&str] = &["Mãe", "nome_mae"];
pub const FATHER: &[&str] = &["Pai", "nome_pai"];
pub const GUARDIAN: &[&str] = &["Responsável", "nome_responsavel"];
pub const GUARDIAN_PHONE: &[&str] = &["Tel resp", "telefone_responsavel"];
pub const ENROLLMENT_DATE: &[&str] = &["Entrada", "data_entrada"];
pub const CITY: &[&str] = &["Cidade/UF", "cidade"];

/// Sub-fields folded into the observations column, in output order.
pub const NOTES: &[(&str, &[&str])] = &[
    ("RG", &["RG", "rg"]),
    ("Prontuário", &["Nº pront", "num_prontuario"]),
    ("Data Saída", &["Saída", "data_saida"]),
    ("Tel Recado", &["Tel rec", "telefone_recado"]),
    ("Cidade", CITY),
    ("Convênio", &["Convênio", "convenio"]),
    ("Alergia", &["Alerg", "alergia"]),
    ("Comorbidade", &["Comorbidade", "comorbidade"]),
    ("Uso Imagem", &["Uso imagem", "uso_imagem"]),
    ("Observações", &["Obs", "observacoes"]),
];

/// Source headers that feed a destination column.
///
/// `None` for the identity placeholder and the observations aggregate,
/// which read no single column.
pub fn source_aliases(column: Column) -> Option<&'static [&'static str]> {
    let aliases = match column {
        Column::Id | Column::Notes => return None,
        Column::Status => STATUS,
        Column::Name => NAME,
        Column::BirthDate => BIRTH_DATE,
        Column::Address => ADDRESS,
        Column::Neighborhood => NEIGHBORHOOD,
        Column::PostalCode => POSTAL_CODE,
        Column::DocumentNumber => DOCUMENT,
        Column::Sex => SEX,
        Column::DisabilityType => DIAGNOSIS,
        Column::MedicationUse | Column::MedicationNames => MEDICATION,
        Column::MotherName => MOTHER,
        Column::FatherName => FATHER,
        Column::GuardianName => GUARDIAN,
        Column::GuardianPhone => GUARDIAN_PHONE,
        Column::EnrollmentDate => ENROLLMENT_DATE,
        Column::MunicipalityId => CITY,
    };
    Some(aliases)
}
