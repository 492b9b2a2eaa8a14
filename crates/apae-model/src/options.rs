//! Conversion configuration passed into the pipeline at construction.

use serde::{Deserialize, Serialize};

use crate::table::TargetTable;

/// What a yes/no field becomes when its value is empty or unrecognized.
///
/// The first converter for this export wrote `false`; a later one wrote
/// `null`. Both are kept selectable per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedBoolean {
    /// Unmatched input becomes `false`.
    #[default]
    False,
    /// Unmatched input becomes `null`.
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// State assumed when a city cell has no separator.
    pub default_state: String,
    /// Separator between city and state in the combined cell.
    pub city_separator: char,
    /// Destination table layout.
    pub table: TargetTable,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            default_state: "RS".to_string(),
            city_separator: '/',
            table: TargetTable::assistido(),
        }
    }
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_state(mut self, state: impl Into<String>) -> Self {
        self.default_state = state.into();
        self
    }

    #[must_use]
    pub fn with_city_separator(mut self, separator: char) -> Self {
        self.city_separator = separator;
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: TargetTable) -> Self {
        self.table = table;
        self
    }
}
