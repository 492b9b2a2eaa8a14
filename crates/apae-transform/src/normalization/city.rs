//! Combined "city/state" cell and municipality lookup.

use std::fmt;

use apae_model::{CellValue, CityLookupTable, FieldWarning, NormalizedField, SqlLiteral};

use super::{Conversion, cell_text};
use crate::error::FieldError;

/// City and state parsed from the combined cell, both upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CityState {
    pub city: String,
    pub state: String,
}

impl CityState {
    /// Key used to probe the lookup table.
    pub fn lookup_key(&self) -> String {
        self.city.to_lowercase()
    }
}

impl fmt::Display for CityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.city, self.state)
    }
}

/// Splits `"Feliz/RS"` into city and state.
///
/// Without a separator the whole value is the city and `default_state` is
/// assumed. Returns `None` for blank input or an empty city part.
pub fn parse_city_state(value: &str, separator: char, default_state: &str) -> Option<CityState> {
    let value = value.trim();
    let (city, state) = match value.split_once(separator) {
        Some((city, rest)) => {
            let state = rest.split(separator).next().unwrap_or_default().trim();
            (city.trim(), state)
        }
        None => (value, ""),
    };
    if city.is_empty() {
        return None;
    }
    let state = if state.is_empty() { default_state } else { state };
    Some(CityState {
        city: city.to_uppercase(),
        state: state.trim().to_uppercase(),
    })
}

/// Municipality identifier for a city cell, plus the parsed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityResolution {
    pub conversion: Conversion,
    pub location: Option<CityState>,
}

/// Resolves the location identifier column.
///
/// A blank cell is `null`. A cell that does not parse, or whose city is not
/// in the lookup table, is `null` with a warning; neither aborts the row.
pub fn resolve_municipality(
    cell: &CellValue,
    cities: &CityLookupTable,
    separator: char,
    default_state: &str,
) -> Result<CityResolution, FieldError> {
    let Some(text) = cell_text(cell)? else {
        return Ok(CityResolution {
            conversion: Conversion::null(),
            location: None,
        });
    };
    let Some(location) = parse_city_state(&text, separator, default_state) else {
        return Ok(CityResolution {
            conversion: Conversion::degraded(
                NormalizedField::Null,
                FieldWarning::MalformedCity {
                    value: text.trim().to_string(),
                },
            ),
            location: None,
        });
    };
    let key = location.lookup_key();
    let conversion = match cities.get(&key) {
        Some(id) => Conversion::ok(SqlLiteral::text(id)),
        None => Conversion::degraded(NormalizedField::Null, FieldWarning::UnmappedCity { city: key }),
    };
    Ok(CityResolution {
        conversion,
        location: Some(location),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FELIZ: &str = "9557b00a-2f75-46ac-bd56-ceec0cb32e40";

    fn cities() -> CityLookupTable {
        CityLookupTable::from_entries([
            ("feliz", FELIZ),
            ("são sebastião do caí", "7677f6d9-6119-40bf-b2d6-6c1e197ed806"),
        ])
        .unwrap()
    }

    #[test]
    fn parses_city_and_state() {
        let parsed = parse_city_state(" Feliz / rs ", '/', "RS").unwrap();
        assert_eq!(parsed.city, "FELIZ");
        assert_eq!(parsed.state, "RS");
        assert_eq!(parsed.to_string(), "FELIZ/RS");
    }

    #[test]
    fn missing_state_uses_default() {
        let parsed = parse_city_state("Montenegro", '/', "RS").unwrap();
        assert_eq!(parsed.state, "RS");
        let parsed = parse_city_state("Montenegro/", '/', "SC").unwrap();
        assert_eq!(parsed.state, "SC");
    }

    #[test]
    fn empty_city_fails() {
        assert_eq!(parse_city_state("/RS", '/', "RS"), None);
        assert_eq!(parse_city_state("  ", '/', "RS"), None);
    }

    #[test]
    fn mapped_city_resolves() {
        let resolution =
            resolve_municipality(&CellValue::from("Feliz/RS"), &cities(), '/', "RS").unwrap();
        assert_eq!(resolution.conversion.value.as_text(), Some(FELIZ));
        assert!(resolution.conversion.warning.is_none());
    }

    #[test]
    fn accents_and_case_are_tolerated() {
        let resolution = resolve_municipality(
            &CellValue::from("SAO SEBASTIAO DO CAI/RS"),
            &cities(),
            '/',
            "RS",
        )
        .unwrap();
        assert_eq!(
            resolution.conversion.value.as_text(),
            Some("7677f6d9-6119-40bf-b2d6-6c1e197ed806")
        );
    }

    #[test]
    fn unmapped_city_warns() {
        let resolution =
            resolve_municipality(&CellValue::from("Gramado/RS"), &cities(), '/', "RS").unwrap();
        assert!(resolution.conversion.value.is_null());
        assert_eq!(
            resolution.conversion.warning,
            Some(FieldWarning::UnmappedCity {
                city: "gramado".to_string()
            })
        );
        assert_eq!(resolution.location.map(|l| l.city), Some("GRAMADO".to_string()));
    }

    #[test]
    fn malformed_cell_warns() {
        let resolution =
            resolve_municipality(&CellValue::from("/RS"), &cities(), '/', "RS").unwrap();
        assert!(resolution.conversion.value.is_null());
        assert!(matches!(
            resolution.conversion.warning,
            Some(FieldWarning::MalformedCity { .. })
        ));
        assert_eq!(resolution.location, None);
    }
}
