//! City coverage check: which spreadsheet cities the lookup table knows.

use std::collections::BTreeMap;

use apae_model::{CityLookupTable, ConversionOptions, RawRecord};
use tracing::debug;

use crate::fields;
use crate::normalization::{CityState, parse_city_state};

/// One distinct city/state pair found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityAudit {
    pub location: CityState,
    /// Identifier from the lookup table, `None` when unmapped.
    pub id: Option<String>,
    /// Number of named records carrying this location.
    pub rows: usize,
}

impl CityAudit {
    pub fn is_mapped(&self) -> bool {
        self.id.is_some()
    }
}

/// Lists the distinct cities of `records`, sorted, with their lookup result.
///
/// Records without a name are ignored, as in conversion. Cells that do not
/// parse as a city are not listed.
pub fn audit_cities(
    records: &[RawRecord],
    cities: &CityLookupTable,
    options: &ConversionOptions,
) -> Vec<CityAudit> {
    let mut counts: BTreeMap<CityState, usize> = BTreeMap::new();
    for record in records {
        if record.first_present(fields::NAME).is_blank() {
            continue;
        }
        let Some(text) = record.first_present(fields::CITY).trimmed() else {
            continue;
        };
        if let Some(location) =
            parse_city_state(&text, options.city_separator, &options.default_state)
        {
            *counts.entry(location).or_default() += 1;
        }
    }

    let audit: Vec<CityAudit> = counts
        .into_iter()
        .map(|(location, rows)| CityAudit {
            id: cities.get(&location.lookup_key()).map(str::to_string),
            location,
            rows,
        })
        .collect();
    debug!(
        cities = audit.len(),
        unmapped = audit.iter().filter(|entry| !entry.is_mapped()).count(),
        "city audit complete"
    );
    audit
}
