//! City name to municipality identifier lookup.

use std::collections::{BTreeMap, HashMap};

use crate::error::{ModelError, Result};
use crate::fold::fold_key;

/// Immutable-after-load mapping from city name to municipality identifier.
///
/// Keys are stored trimmed and lower-cased. Lookups try the exact key first
/// and then an accent-insensitive key, so "Sao Marcos" finds "são marcos".
#[derive(Debug, Clone, Default)]
pub struct CityLookupTable {
    entries: BTreeMap<String, String>,
    folded: HashMap<String, String>,
}

impl CityLookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(city, identifier)` pairs.
    pub fn from_entries<I, C, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, V)>,
        C: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::new();
        for (city, id) in entries {
            table.insert(city.as_ref(), id.as_ref())?;
        }
        Ok(table)
    }

    /// Adds one mapping. Re-adding the same pair is a no-op; mapping a city
    /// to a second identifier is an error.
    pub fn insert(&mut self, city: &str, id: &str) -> Result<()> {
        let key = city.trim().to_lowercase();
        let id = id.trim();
        if key.is_empty() {
            return Err(ModelError::EmptyCityEntry {
                entry: id.to_string(),
                field: "city name",
            });
        }
        if id.is_empty() {
            return Err(ModelError::EmptyCityEntry {
                entry: key,
                field: "identifier",
            });
        }
        if let Some(existing) = self.entries.get(&key) {
            if existing == id {
                return Ok(());
            }
            return Err(ModelError::DuplicateCity {
                city: key,
                first: existing.clone(),
                second: id.to_string(),
            });
        }
        self.folded
            .entry(fold_key(&key))
            .or_insert_with(|| id.to_string());
        self.entries.insert(key, id.to_string());
        Ok(())
    }

    /// Resolves a city name (any casing, surrounding whitespace ignored).
    pub fn get(&self, city: &str) -> Option<&str> {
        let key = city.trim().to_lowercase();
        self.entries
            .get(&key)
            .or_else(|| self.folded.get(&fold_key(&key)))
            .map(String::as_str)
    }

    pub fn contains(&self, city: &str) -> bool {
        self.get(city).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(city, id)| (city.as_str(), id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FELIZ: &str = "9557b00a-2f75-46ac-bd56-ceec0cb32e40";

    #[test]
    fn exact_and_folded_lookup() {
        let table = CityLookupTable::from_entries([
            ("Feliz", FELIZ),
            ("são marcos", "79732666-32f2-4b4c-a019-4d4961f5df28"),
        ])
        .unwrap();
        assert_eq!(table.get(" FELIZ "), Some(FELIZ));
        assert_eq!(
            table.get("Sao Marcos"),
            Some("79732666-32f2-4b4c-a019-4d4961f5df28")
        );
        assert_eq!(table.get("gramado"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn duplicate_with_other_id_is_rejected() {
        let mut table = CityLookupTable::new();
        table.insert("feliz", FELIZ).unwrap();
        table.insert("Feliz", FELIZ).unwrap();
        let err = table.insert("feliz", "other").unwrap_err();
        assert!(matches!(err, ModelError::DuplicateCity { .. }));
    }

    #[test]
    fn blank_entries_are_rejected() {
        let mut table = CityLookupTable::new();
        assert!(table.insert("  ", FELIZ).is_err());
        assert!(table.insert("feliz", " ").is_err());
        assert!(table.is_empty());
    }
}
