//! Field-level warnings: values that could not be interpreted and were
//! replaced by `null` (or by a documented default).

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldWarning {
    UnparsableDate { value: String },
    UnmappedCity { city: String },
    MalformedCity { value: String },
    UnrecognizedSex { value: String },
    /// The status still receives the active code.
    UnrecognizedStatus { value: String },
    UnrecognizedBoolean { value: String },
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparsableDate { value } => write!(f, "invalid date '{value}'"),
            Self::UnmappedCity { city } => {
                write!(f, "city not found in lookup table: '{city}' (set to NULL)")
            }
            Self::MalformedCity { value } => write!(f, "malformed city/state value '{value}'"),
            Self::UnrecognizedSex { value } => write!(f, "unrecognized sex '{value}'"),
            Self::UnrecognizedStatus { value } => {
                write!(f, "unrecognized status '{value}' (defaulted to active)")
            }
            Self::UnrecognizedBoolean { value } => {
                write!(f, "unrecognized yes/no value '{value}'")
            }
        }
    }
}
