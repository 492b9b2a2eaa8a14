//! Municipality lookup table resource.
//!
//! The table is a two-column CSV (`municipio,id`). A default covering the
//! municipalities served today is compiled into the binary.

use std::path::Path;

use apae_model::{CityLookupTable, fold_key};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::spreadsheet::{decode_bytes, detect_delimiter};

/// Embedded default table.
pub const DEFAULT_CITY_TABLE: &str = include_str!("../data/municipios.csv");

const CITY_COLUMN: &str = "municipio";
const ID_COLUMN: &str = "id";

/// Label used for errors in the embedded table.
const EMBEDDED_LABEL: &str = "<embedded municipios.csv>";

/// The compiled-in lookup table.
pub fn default_city_table() -> Result<CityLookupTable> {
    parse_city_table(DEFAULT_CITY_TABLE, Path::new(EMBEDDED_LABEL))
}

/// Loads a lookup table from a CSV file.
pub fn load_city_table(path: &Path) -> Result<CityLookupTable> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
                candidates: Vec::new(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let table = parse_city_table(&decode_bytes(&bytes).text, path)?;
    debug!(path = %path.display(), cities = table.len(), "loaded city table");
    Ok(table)
}

/// Parses lookup table text. `path` only labels errors.
pub fn parse_city_table(text: &str, path: &Path) -> Result<CityLookupTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let header_line = text.lines().next().unwrap_or_default();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(header_line))
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| IngestError::csv_parse(path, &e))?
        .clone();
    let find = |column: &'static str| {
        headers
            .iter()
            .position(|header| fold_key(header) == column)
            .ok_or_else(|| IngestError::MissingColumn {
                column,
                path: path.to_path_buf(),
            })
    };
    let city_index = find(CITY_COLUMN)?;
    let id_index = find(ID_COLUMN)?;

    let mut table = CityLookupTable::new();
    for result in reader.records() {
        let record = result.map_err(|e| IngestError::csv_parse(path, &e))?;
        let city = record.get(city_index).unwrap_or_default();
        let id = record.get(id_index).unwrap_or_default();
        table
            .insert(city, id)
            .map_err(|source| IngestError::CityTable {
                path: path.to_path_buf(),
                source,
            })?;
    }
    if table.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_loads() {
        let table = default_city_table().unwrap();
        assert_eq!(table.len(), 26);
        assert_eq!(table.get("feliz"), Some("9557b00a-2f75-46ac-bd56-ceec0cb32e40"));
        assert_eq!(
            table.get("sao jose do hortencio"),
            Some("67544348-72d6-40ad-ae16-27c05b95b903")
        );
    }

    #[test]
    fn test_parse_semicolon_table_with_reordered_columns() {
        let table = parse_city_table("ID;Município\nabc;Gramado\n", Path::new("c.csv")).unwrap();
        assert_eq!(table.get("gramado"), Some("abc"));
    }

    #[test]
    fn test_missing_id_column() {
        let result = parse_city_table("municipio,codigo\nfeliz,1\n", Path::new("c.csv"));
        assert!(matches!(
            result,
            Err(IngestError::MissingColumn { column: "id", .. })
        ));
    }

    #[test]
    fn test_blank_id_is_rejected() {
        let result = parse_city_table("municipio,id\nfeliz,\n", Path::new("c.csv"));
        assert!(matches!(result, Err(IngestError::CityTable { .. })));
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let result = parse_city_table("municipio,id\n", Path::new("c.csv"));
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }
}
